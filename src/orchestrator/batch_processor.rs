//! 批量文档导入器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的导入和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建导入服务
//! 2. **批量加载**：扫描待导入的文本文档（`Vec<PathBuf>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文档分批次导入，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文档的导入结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份文档的细节
//! - **并发安全**：解析核心无共享状态，任务之间零协调
//! - **向下委托**：委托 import_service 处理单份文档

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::services::ImportService;

/// 应用主结构
pub struct App {
    config: Config,
    import_service: Arc<ImportService>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let import_service = Arc::new(ImportService::new(&config));

        Ok(Self {
            config,
            import_service,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 扫描所有待导入的文档
        let all_docs = self.load_documents().await?;

        if all_docs.is_empty() {
            warn!("⚠️ 没有找到待导入的文本文档，程序结束");
            return Ok(());
        }

        let total_docs = all_docs.len();
        log_documents_loaded(total_docs, self.config.max_concurrent_imports);

        // 导入所有文档
        let stats = self.process_all_documents(all_docs).await?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        Ok(())
    }

    /// 扫描文档目录下的 .txt 文件
    async fn load_documents(&self) -> Result<Vec<PathBuf>> {
        info!("\n📁 正在扫描待导入的文档...");

        let folder = PathBuf::from(&self.config.doc_folder);
        if !folder.exists() {
            anyhow::bail!("文档目录不存在: {}", self.config.doc_folder);
        }

        let mut docs = Vec::new();
        let mut entries = tokio::fs::read_dir(&folder).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("txt") {
                docs.push(path);
            }
        }
        docs.sort();
        Ok(docs)
    }

    /// 导入所有文档
    async fn process_all_documents(&self, all_docs: Vec<PathBuf>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_imports));
        let total_docs = all_docs.len();
        let mut stats = ProcessingStats {
            total: total_docs,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_docs).step_by(self.config.max_concurrent_imports) {
            let batch_end = (batch_start + self.config.max_concurrent_imports).min(total_docs);
            let batch_docs = &all_docs[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_imports) + 1;
            let total_batches = (total_docs + self.config.max_concurrent_imports - 1)
                / self.config.max_concurrent_imports;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_docs,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_docs, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;
            stats.questions += batch_result.questions;

            log_batch_complete(batch_num, &batch_result);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_docs: &[PathBuf],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, doc_path) in batch_docs.iter().enumerate() {
            let doc_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let service = self.import_service.clone();
            let doc_path = doc_path.clone();
            let output_folder = self.config.output_folder.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                import_one_document(&service, &doc_path, &output_folder, doc_index).await
            });
            batch_handles.push((doc_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (doc_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(question_count)) => {
                    result.success += 1;
                    result.questions += question_count;
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", doc_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 导入单份文档：解析 + 落盘，返回题目数量
async fn import_one_document(
    service: &ImportService,
    doc_path: &PathBuf,
    output_folder: &str,
    doc_index: usize,
) -> Result<usize> {
    info!(
        "[文档 {}] 开始导入: {}",
        doc_index,
        doc_path.file_name().unwrap_or_default().to_string_lossy()
    );

    let bank = match service.import_file(doc_path).await {
        Ok(bank) => bank,
        Err(e) => {
            error!("[文档 {}] ❌ 导入失败: {}", doc_index, e);
            return Err(e.into());
        }
    };

    let question_count = bank.len();
    info!(
        "[文档 {}] ✓ 科目: {}, 题目数: {}",
        doc_index, bank.subject, question_count
    );

    service.save_bank(&bank, output_folder).await?;

    Ok(question_count)
}

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    success: usize,
    failed: usize,
    questions: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    questions: usize,
}

// ========== 日志辅助函数 ==========

fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n文档导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量题目导入模式");
    info!("📊 最大并发数: {}", config.max_concurrent_imports);
    info!("{}", "=".repeat(60));
}

fn log_documents_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待导入的文档", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
    info!("💡 每批完成后再开始下一批\n");
}

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批文档: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {}/{}, 新增题目 {}",
        batch_num,
        result.success,
        result.success + result.failed,
        result.questions
    );
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部导入完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("📚 共导入题目: {}", stats.questions);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
