//! # 应用配置数据模型
//!
//! 定义了 Routine Advisor 的运行配置（AdvisorConfig），
//! 存储在 `<系统配置目录>/routine-advisor/config.json`。

use serde::{Deserialize, Serialize};

/// 目录文档的默认相对路径
pub const DEFAULT_CATALOG_PATH: &str = "products.json";

/// 运行配置数据结构
///
/// 所有字段均可缺省，缺省值见 `Default` 实现。
///
/// 对应配置文件格式：
/// ```json
/// {
///   "completionEndpoint": "https://worker.example.dev/",
///   "catalogPath": "products.json",
///   "storePath": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisorConfig {
    /// 远程 chat-completion 端点地址
    ///
    /// 为 `None` 时不影响启动，首次发送请求时报告配置错误。
    pub completion_endpoint: Option<String>,

    /// 产品目录文档路径（相对路径以当前工作目录为基准）
    pub catalog_path: String,

    /// 本地键值存储文件路径；为 `None` 时使用配置目录下的 `local-storage.json`
    pub store_path: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            completion_endpoint: None,
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            store_path: None,
        }
    }
}
