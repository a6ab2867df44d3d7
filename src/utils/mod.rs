//! # 通用工具模块
//!
//! - `path` - 配置目录与数据文件路径

pub mod path;
