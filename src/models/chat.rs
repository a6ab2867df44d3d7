//! # 对话数据模型
//!
//! 定义了对话轮次（ChatTurn）及其角色（Role），
//! 序列化格式与 OpenAI chat-completion 的 `messages` 数组元素一致：
//! `{ "role": "system" | "user" | "assistant", "content": "..." }`。

use serde::{Deserialize, Serialize};

/// 对话轮次的来源角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 系统指令：设定助手的行为和上下文
    System,
    /// 用户输入
    User,
    /// 助手（模型）输出
    Assistant,
}

/// 单条对话轮次
///
/// 对话序列只追加，唯一例外是会话开始或生成护理方案时整体重置。
/// 每次请求都会发送完整序列（不截断）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
