//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! - `product` - 产品目录与产品投影
//! - `chat` - 对话轮次与角色
//! - `filter` - 分类/搜索筛选条件
//! - `view` - 渲染器输出的显示指令
//! - `settings` - 应用运行配置

pub mod chat;
pub mod filter;
pub mod product;
pub mod settings;
pub mod view;
