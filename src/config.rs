/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时导入的文档数量
    pub max_concurrent_imports: usize,
    /// 待导入文档存放目录
    pub doc_folder: String,
    /// 题库输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_imports: 4,
            doc_folder: "import_docs".to_string(),
            output_folder: "output_toml".to_string(),
            verbose_logging: false,
            output_log_file: "import_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_imports: std::env::var("MAX_CONCURRENT_IMPORTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_imports),
            doc_folder: std::env::var("DOC_FOLDER").unwrap_or(default.doc_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
