//! # 远程补全客户端
//!
//! 将完整的对话序列发送到配置的 chat-completion 端点，返回单条助手回复文本。
//!
//! ## 请求/响应格式
//! - 请求：`POST <endpoint>`，JSON 体 `{ "messages": [{ "role", "content" }, ...] }`
//! - 响应：兼容两种约定
//!   - OpenAI 风格：`{ "choices": [{ "message": { "content": "..." } }] }`
//!   - 扁平风格：`{ "content": "..." }`
//!
//! 不做重试：失败直接返回给发起请求的界面操作，由用户再次操作来重试。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::CompletionError;
use crate::models::chat::ChatTurn;

/// 补全服务抽象
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// 发送对话序列，返回助手回复文本
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError>;
}

/// 请求体
#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatTurn],
}

/// 基于 reqwest 的 HTTP 补全客户端
pub struct HttpCompletionClient {
    client: Client,
    /// 端点地址；为 None 时所有请求返回 `CompletionError::Configuration`
    endpoint: Option<String>,
}

impl HttpCompletionClient {
    /// 使用默认超时（连接 10 秒、整体 120 秒）构造客户端
    pub fn new(endpoint: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("构造 HTTP 客户端失败，使用默认配置: {}", e);
                Client::new()
            });
        Self::with_client(client, endpoint)
    }

    /// 使用外部构造的 `reqwest::Client`（自定义代理、超时等）
    pub fn with_client(client: Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl CompletionService for HttpCompletionClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(CompletionError::Configuration)?;

        if turns.is_empty() {
            return Err(CompletionError::Validation);
        }

        log::debug!("发送补全请求: {} ({} 条消息)", endpoint, turns.len());

        let response = self
            .client
            .post(endpoint)
            .json(&CompletionRequest { messages: turns })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("补全端点返回错误状态: {}", status);
            return Err(CompletionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        log::debug!("收到补全响应: {} 字节", body.len());
        parse_completion_body(&body)
    }
}

/// 从成功响应体中提取助手回复
///
/// 优先读取 `choices[0].message.content`，其次读取顶层 `content`；
/// 两者都不存在或为空字符串时返回 `CompletionError::Format`。
pub fn parse_completion_body(body: &str) -> Result<String, CompletionError> {
    let value: Value = serde_json::from_str(body).map_err(|_| CompletionError::Format)?;

    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            value
                .get("content")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .ok_or(CompletionError::Format)
}
