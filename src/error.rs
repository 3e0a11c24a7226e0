use thiserror::Error;

/// 文档解析错误
///
/// 单个题目的缺陷在解析过程中静默丢弃，不会以错误形式出现；
/// 只有整份文档没有产出任何有效题目时才报告解析失败，
/// 并附上文本预览帮助作者排查格式问题。
#[derive(Debug, Error)]
pub enum ParseError {
    /// 整份文档未找到有效题目
    #[error(
        "未找到有效的题目数据，请检查文档格式。确保题目包含序号和题型标记，如：1.【单选题】 (文本预览: {snippet})"
    )]
    NoValidQuestions { snippet: String },
}

/// 文档导入错误
#[derive(Debug, Error)]
pub enum ImportError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 文件为空
    #[error("上传的文件为空: {path}")]
    EmptyFile { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文件包含大量非文本字符，疑似二进制格式
    #[error("文件似乎是二进制格式，无法解析为文本 ({path}, 非文本字符比例: {ratio:.2})")]
    BinaryContent { path: String, ratio: f64 },
    /// 文件内容为空或过短
    #[error("文件内容为空或过短: {path}")]
    ContentTooShort { path: String },
    /// 文档内容解析错误
    #[error("文档内容解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 题库序列化失败
    #[error("序列化题库失败: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 题库写入失败
    #[error("写入题库失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 导入结果类型别名
pub type ImportResult<T> = Result<T, ImportError>;
