//! # 路径工具函数
//!
//! 提供与应用数据文件位置相关的工具函数：
//! - 获取应用自身配置目录（`<系统配置目录>/routine-advisor/`）
//! - 获取配置文件与本地键值存储文件的默认路径
//! - 将相对路径解析到指定基准目录

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 应用目录名
const APP_DIR_NAME: &str = "routine-advisor";

/// 获取应用配置目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的系统配置目录。
///
/// # 示例
/// - Windows: `C:\Users\username\AppData\Roaming\routine-advisor`
/// - Linux: `/home/username/.config/routine-advisor`
/// - macOS: `/Users/username/Library/Application Support/routine-advisor`
///
/// # 错误
/// 无法确定系统配置目录时返回 `ConfigError::NoConfigDir`
pub fn get_app_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR_NAME))
}

/// 配置文件路径：`<应用配置目录>/config.json`
pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(get_app_config_path()?.join("config.json"))
}

/// 本地键值存储文件的默认路径：`<应用配置目录>/local-storage.json`
pub fn get_default_store_path() -> Result<PathBuf, ConfigError> {
    Ok(get_app_config_path()?.join("local-storage.json"))
}

/// 将路径解析到基准目录
///
/// 绝对路径原样返回；相对路径拼接到 `base` 之后。
pub fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}
