//! # 运行配置加载
//!
//! 从 `<系统配置目录>/routine-advisor/config.json` 读取 `AdvisorConfig`：
//! - 文件不存在时使用默认配置（未配置补全端点不影响启动）
//! - 文件存在但无法解析时返回错误
//! - 环境变量 `ROUTINE_ADVISOR_ENDPOINT` 非空时覆盖补全端点

use std::path::Path;

use crate::error::ConfigError;
use crate::models::settings::AdvisorConfig;
use crate::utils::path;

/// 覆盖补全端点的环境变量名
pub const ENDPOINT_ENV_VAR: &str = "ROUTINE_ADVISOR_ENDPOINT";

/// 读取默认位置的配置文件并应用环境变量覆盖
pub fn load_config() -> Result<AdvisorConfig, ConfigError> {
    let config_path = path::get_config_file_path()?;
    let config = load_config_from(&config_path)?;
    Ok(apply_endpoint_override(
        config,
        std::env::var(ENDPOINT_ENV_VAR).ok(),
    ))
}

/// 从指定路径读取配置文件，文件不存在时返回默认配置
pub fn load_config_from(config_path: &Path) -> Result<AdvisorConfig, ConfigError> {
    if !config_path.exists() {
        log::info!("配置文件不存在，使用默认配置: {}", config_path.display());
        return Ok(AdvisorConfig::default());
    }

    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 用环境变量中的端点地址覆盖配置（空白值忽略）
pub fn apply_endpoint_override(mut config: AdvisorConfig, endpoint: Option<String>) -> AdvisorConfig {
    if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
        config.completion_endpoint = Some(endpoint);
    }
    config
}
