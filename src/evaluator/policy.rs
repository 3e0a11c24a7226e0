//! 简答题评分策略
//!
//! 权重、长度惩罚与给分档位集中在一张策略表里，
//! 调用方可以整表替换而不必改动评分流程。

use serde::{Deserialize, Serialize};

/// 给分档位：调整后匹配率达到阈值即落档
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTier {
    /// 落档阈值（含）
    pub threshold: f64,
    /// 本档是否判为正确
    pub is_correct: bool,
    /// 得分比例，乘以题目满分
    pub fraction: f64,
}

/// 简答题评分策略表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayPolicy {
    /// 低于该字符数的作答直接判零分
    pub min_answer_chars: usize,
    /// 关键词最小长度（短于该长度的分词不参与匹配）
    pub min_keyword_chars: usize,
    /// 关键词数量匹配率权重
    pub count_weight: f64,
    /// 关键词长度匹配率权重
    pub length_weight: f64,
    /// 作答长度/标准答案长度低于该比例时按过短惩罚
    pub short_length_ratio: f64,
    /// 过短惩罚系数
    pub short_penalty: f64,
    /// 作答长度/标准答案长度高于该比例时按过长惩罚
    pub long_length_ratio: f64,
    /// 过长惩罚系数
    pub long_penalty: f64,
    /// 给分档位，按阈值从高到低排列
    pub tiers: Vec<ScoreTier>,
}

impl Default for EssayPolicy {
    fn default() -> Self {
        Self {
            min_answer_chars: 5,
            min_keyword_chars: 2,
            count_weight: 0.6,
            length_weight: 0.4,
            short_length_ratio: 0.2,
            short_penalty: 0.5,
            long_length_ratio: 3.0,
            long_penalty: 0.8,
            tiers: vec![
                ScoreTier { threshold: 0.7, is_correct: true, fraction: 1.0 },
                ScoreTier { threshold: 0.5, is_correct: true, fraction: 0.8 },
                ScoreTier { threshold: 0.35, is_correct: false, fraction: 0.6 },
                ScoreTier { threshold: 0.2, is_correct: false, fraction: 0.3 },
            ],
        }
    }
}

impl EssayPolicy {
    /// 按调整后匹配率落档；所有档位都未达到时零分
    pub fn tier_for(&self, adjusted_ratio: f64) -> (bool, f64) {
        self.tiers
            .iter()
            .find(|tier| adjusted_ratio >= tier.threshold)
            .map(|tier| (tier.is_correct, tier.fraction))
            .unwrap_or((false, 0.0))
    }

    /// 作答长度的合理性惩罚系数
    pub fn length_penalty(&self, answer_length_ratio: f64) -> f64 {
        if answer_length_ratio < self.short_length_ratio {
            self.short_penalty
        } else if answer_length_ratio > self.long_length_ratio {
            self.long_penalty
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let policy = EssayPolicy::default();
        assert_eq!(policy.tier_for(0.85), (true, 1.0));
        assert_eq!(policy.tier_for(0.7), (true, 1.0));
        assert_eq!(policy.tier_for(0.55), (true, 0.8));
        assert_eq!(policy.tier_for(0.4), (false, 0.6));
        assert_eq!(policy.tier_for(0.25), (false, 0.3));
        assert_eq!(policy.tier_for(0.1), (false, 0.0));
    }

    #[test]
    fn test_length_penalty_bands() {
        let policy = EssayPolicy::default();
        assert_eq!(policy.length_penalty(0.1), 0.5);
        assert_eq!(policy.length_penalty(1.0), 1.0);
        assert_eq!(policy.length_penalty(3.5), 0.8);
    }

    #[test]
    fn test_tier_monotonic_in_ratio() {
        let policy = EssayPolicy::default();
        let mut last = -1.0;
        for step in 0..=100 {
            let ratio = step as f64 / 100.0;
            let (_, fraction) = policy.tier_for(ratio);
            assert!(fraction >= last, "分数档位应随匹配率单调不降");
            last = fraction;
        }
    }
}
