//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `storage` - 本地键值存储（localStorage 等价物）
//! - `catalog` - 产品目录加载与一次性缓存
//! - `selection` - 选购清单，变更即持久化
//! - `filter` - 分类/搜索筛选引擎
//! - `grid` - 商品网格渲染器
//! - `selected_list` - 已选产品列表渲染器
//! - `completion` - 远程 chat-completion 客户端
//! - `conversation` - 对话轮次与聊天窗口管理
//! - `config` - 运行配置加载
//! - `advisor` - 编排：组合以上服务，处理用户操作

pub mod advisor;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod conversation;
pub mod filter;
pub mod grid;
pub mod selected_list;
pub mod selection;
pub mod storage;
