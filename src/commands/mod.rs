//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个界面区域：
//! - `products` - 分类/搜索、商品网格交互
//! - `selection` - 已选列表的移除与清空
//! - `chat` - 护理方案生成与后续对话
//!
//! 仅在启用 `desktop` feature 时编译。

pub mod chat;
pub mod products;
pub mod selection;
