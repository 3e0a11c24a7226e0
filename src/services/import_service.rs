//! 文档导入服务 - 业务能力层
//!
//! 只负责"一份文档"的导入：读取、健全性检查、解析、落盘。
//! 不关心目录扫描与并发，那是编排层的事。

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ImportError, ImportResult};
use crate::models::QuestionBank;
use crate::parser::parse_document;
use crate::utils::logging::truncate_text;

/// 非文本字符占比超过该值时按二进制文件拒绝
const BINARY_RATIO_LIMIT: f64 = 0.3;

/// 有效文档的最小内容长度（字符）
const MIN_CONTENT_CHARS: usize = 10;

/// 文档导入服务
#[derive(Debug, Clone)]
pub struct ImportService {
    verbose_logging: bool,
}

impl ImportService {
    /// 创建新的导入服务
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    /// 导入单份文档并构建题库
    pub async fn import_file(&self, path: &Path) -> ImportResult<QuestionBank> {
        let text = self.load_text(path).await?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "未命名题库".to_string());

        info!("开始解析文档: {} ({} 字符)", name, text.chars().count());

        let questions = parse_document(&text)?;
        info!("✓ 解析完成: {} 共 {} 道题目", name, questions.len());

        if self.verbose_logging {
            for (idx, question) in questions.iter().enumerate() {
                debug!(
                    "  {}. [{}] {}",
                    idx + 1,
                    question.question_type,
                    truncate_text(&question.title, 40)
                );
            }
        }

        let bank = QuestionBank::new(name, questions)
            .with_file_path(path.to_string_lossy().to_string());
        Ok(bank)
    }

    /// 将题库写入输出目录，返回写入的文件路径
    pub async fn save_bank(&self, bank: &QuestionBank, output_folder: &str) -> ImportResult<PathBuf> {
        let content = toml::to_string_pretty(bank)?;

        let out_dir = PathBuf::from(output_folder);
        if let Err(source) = fs::create_dir_all(&out_dir).await {
            return Err(ImportError::WriteFailed {
                path: out_dir.to_string_lossy().to_string(),
                source,
            });
        }

        let out_path = out_dir.join(format!("{}.toml", bank.name));
        fs::write(&out_path, content)
            .await
            .map_err(|source| ImportError::WriteFailed {
                path: out_path.to_string_lossy().to_string(),
                source,
            })?;

        info!("✓ 题库已写入: {}", out_path.display());
        Ok(out_path)
    }

    /// 读取文档文本并做健全性检查
    async fn load_text(&self, path: &Path) -> ImportResult<String> {
        let path_display = path.to_string_lossy().to_string();

        let metadata = fs::metadata(path).await.map_err(|_| ImportError::NotFound {
            path: path_display.clone(),
        })?;
        if metadata.len() == 0 {
            return Err(ImportError::EmptyFile { path: path_display });
        }

        let text = fs::read_to_string(path)
            .await
            .map_err(|source| ImportError::ReadFailed {
                path: path_display.clone(),
                source,
            })?;

        // 旧版 Word/WPS 文件偶尔被直接改名为 .txt 上传，按字符分布识别
        let ratio = binary_char_ratio(&text);
        if ratio > BINARY_RATIO_LIMIT {
            warn!("文件疑似二进制格式: {} (比例 {:.2})", path_display, ratio);
            return Err(ImportError::BinaryContent {
                path: path_display,
                ratio,
            });
        }

        if text.trim().chars().count() < MIN_CONTENT_CHARS {
            return Err(ImportError::ContentTooShort { path: path_display });
        }

        Ok(text)
    }
}

/// 控制字符与 latin-1 乱码在全文中的占比
fn binary_char_ratio(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let total = text.chars().count();
    let binary = text
        .chars()
        .filter(|c| {
            matches!(c, '\u{0000}'..='\u{0008}' | '\u{000E}'..='\u{001F}' | '\u{007F}'..='\u{00FF}')
        })
        .count();
    binary as f64 / total as f64
}
