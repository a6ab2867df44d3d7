//! # 错误类型
//!
//! 按领域划分的类型化错误，均基于 `thiserror` 派生。
//!
//! 内部 API 返回 `Result<T, XxxError>` 并使用 `?` 传播；
//! 到达 Tauri command 边界时通过 `Display` 转换为 `String`，
//! 与 IPC 层 `Result<T, String>` 的约定保持一致。

use thiserror::Error;

/// 产品目录加载失败（LoadError）
///
/// 由调用方决定是展示还是重试；目录缓存不会被部分填充。
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("读取产品目录失败: {0}")]
    Fetch(#[from] std::io::Error),

    #[error("解析产品目录失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 本地键值存储读写失败
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("本地存储读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("本地存储序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 配置文件加载失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无法获取系统配置目录")]
    NoConfigDir,

    #[error("读取配置文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析配置文件失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 远程补全请求失败
///
/// 所有变体最终都以助手样式的错误气泡原样展示在聊天窗口中。
#[derive(Debug, Error)]
pub enum CompletionError {
    /// 未配置补全端点地址
    #[error("Completion endpoint is not configured.")]
    Configuration,

    /// 对话序列为空
    #[error("Messages array is empty or invalid.")]
    Validation,

    /// 端点返回非成功状态码
    #[error("Worker error: {status} {body}")]
    Service { status: u16, body: String },

    /// 成功响应无法解析为预期结构
    #[error("Unexpected worker response format.")]
    Format,

    /// 网络层失败（连接、TLS、读取响应体等）
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// 对话操作失败
#[derive(Debug, Error)]
pub enum ConversationError {
    /// 在未选择任何产品时请求生成护理方案（EmptySelectionError）
    #[error("Please select at least one product to generate a routine.")]
    EmptySelection,

    /// 构造请求内容失败（产品投影序列化）
    #[error("序列化产品信息失败: {0}")]
    Serialization(#[from] serde_json::Error),
}
