//! # 对话管理服务
//!
//! 持有有序的对话轮次和聊天窗口显示模型，驱动对远程补全服务的调用。
//!
//! ## 两个入口
//! - **生成护理方案**：把对话重置为 [系统指令, 包含所选产品 JSON 的用户消息] 后请求补全
//! - **继续对话**：追加用户消息，显示 “Thinking...” 占位，请求完成后替换为回复或错误
//!
//! ## 请求序号
//! 每个发出的请求携带单调递增的序号。响应到达时若已有更新的请求发出，
//! 该响应被丢弃（仅移除它自己的占位气泡），不修改对话序列。
//!
//! `begin_*` / `complete` 拆分为两步，编排层可以在等待网络响应期间释放锁；
//! `start_routine` / `continue_chat` 是独占持有时的一步式封装。
//!
//! ## 已知限制
//! 每次请求都发送完整的对话序列，没有截断或摘要策略，长对话的请求体会持续增长。

use crate::error::{CompletionError, ConversationError};
use crate::models::chat::ChatTurn;
use crate::models::product::{Product, ProductSummary};
use crate::models::view::{BubbleKind, ChatBubble, ChatWindowView};
use crate::services::completion::CompletionService;

/// 会话开始时的系统指令
pub const CHAT_SYSTEM_PROMPT: &str = "You are a friendly and knowledgeable beauty assistant. \
Always answer in a warm, concise tone with product insights and skincare tips.";

/// 会话开始时的欢迎语
pub const GREETING: &str =
    "Hi! I'm your beauty assistant. Ask me anything about your skincare or makeup routine ✨";

/// 生成护理方案时的系统指令
pub const ROUTINE_SYSTEM_PROMPT: &str = "You are a helpful beauty assistant. \
Use only the provided product information to create a simple step-by-step personalized routine \
(morning/night and usage order). Keep it concise and beginner-friendly.";

/// 护理方案请求进行中的提示
pub const GENERATING_MESSAGE: &str = "Generating routine...";

/// 对话请求进行中的占位文本
pub const PENDING_MESSAGE: &str = "Thinking...";

/// 请求类别：决定响应到达后如何更新聊天窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// 生成护理方案：响应替换整个聊天窗口
    Routine,
    /// 继续对话：响应替换该请求的占位气泡
    Chat,
}

/// 已发出、等待响应的请求
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// 请求序号（单调递增）
    pub seq: u64,
    pub kind: RequestKind,
    /// 发出请求时的完整对话序列快照
    pub turns: Vec<ChatTurn>,
}

/// 响应处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 响应已写入对话和聊天窗口
    Applied,
    /// 已有更新的请求发出，该响应被丢弃
    Discarded,
}

/// 对话管理器
pub struct ConversationManager {
    /// 有序对话轮次，每次请求整体发送
    turns: Vec<ChatTurn>,
    /// 聊天窗口中的气泡
    window: Vec<ChatBubble>,
    /// 最近一次发出的请求序号（0 表示尚未发出请求）
    latest_request: u64,
}

impl ConversationManager {
    /// 以欢迎语开始新会话
    pub fn new() -> Self {
        Self {
            turns: vec![
                ChatTurn::system(CHAT_SYSTEM_PROMPT),
                ChatTurn::assistant(GREETING),
            ],
            window: vec![ChatBubble::new(
                BubbleKind::Assistant,
                format!("👋 {GREETING}"),
            )],
            latest_request: 0,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// 聊天窗口的显示指令
    pub fn window(&self) -> ChatWindowView {
        ChatWindowView {
            bubbles: self.window.clone(),
        }
    }

    /// 开始生成护理方案
    ///
    /// # 错误
    /// - `EmptySelection`：未选择任何产品。聊天窗口只显示一条提示，不发出请求，
    ///   此前已发出、尚未返回的请求的响应将被丢弃
    pub fn begin_routine(&mut self, products: &[&Product]) -> Result<PendingRequest, ConversationError> {
        if products.is_empty() {
            let err = ConversationError::EmptySelection;
            // 提示替换了整个窗口，仍在等待的请求随之作废
            self.latest_request += 1;
            self.window = vec![ChatBubble::new(BubbleKind::Notice, err.to_string())];
            return Err(err);
        }

        let summaries: Vec<ProductSummary> = products.iter().map(|p| ProductSummary::from(*p)).collect();
        let product_context = format!(
            "Products JSON:\n{}",
            serde_json::to_string_pretty(&summaries)?
        );

        self.turns = vec![
            ChatTurn::system(ROUTINE_SYSTEM_PROMPT),
            ChatTurn::user(format!(
                "Create a personalized routine using these products:\n\n{product_context}"
            )),
        ];

        let request = self.issue(RequestKind::Routine);
        let mut notice = ChatBubble::new(BubbleKind::Notice, GENERATING_MESSAGE);
        notice.request = Some(request.seq);
        self.window = vec![notice];

        log::info!("开始生成护理方案，共 {} 个产品", products.len());
        Ok(request)
    }

    /// 开始一轮对话
    ///
    /// 输入去除首尾空白后为空时不做任何事，返回 None。
    pub fn begin_chat(&mut self, text: &str) -> Option<PendingRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.turns.push(ChatTurn::user(text));
        self.window.push(ChatBubble::new(BubbleKind::User, text));

        let request = self.issue(RequestKind::Chat);
        self.window.push(ChatBubble::pending(PENDING_MESSAGE, request.seq));
        Some(request)
    }

    fn issue(&mut self, kind: RequestKind) -> PendingRequest {
        self.latest_request += 1;
        PendingRequest {
            seq: self.latest_request,
            kind,
            turns: self.turns.clone(),
        }
    }

    /// 处理请求的响应
    ///
    /// 只有成功时才追加助手轮次，失败的请求不会在对话序列中留下助手条目。
    pub fn complete(
        &mut self,
        request: &PendingRequest,
        result: Result<String, CompletionError>,
    ) -> Completion {
        if request.seq != self.latest_request {
            log::info!(
                "丢弃过期响应 #{}（最新请求 #{}）",
                request.seq,
                self.latest_request
            );
            self.window.retain(|b| b.request != Some(request.seq));
            return Completion::Discarded;
        }

        let bubble = match &result {
            Ok(text) => ChatBubble::new(BubbleKind::Assistant, text.as_str()),
            Err(e) => {
                log::warn!("补全请求 #{} 失败: {}", request.seq, e);
                ChatBubble::new(BubbleKind::Error, format!("Error: {e}"))
            }
        };

        match request.kind {
            RequestKind::Routine => self.window = vec![bubble],
            RequestKind::Chat => {
                match self
                    .window
                    .iter()
                    .position(|b| b.request == Some(request.seq))
                {
                    Some(index) => self.window[index] = bubble,
                    None => self.window.push(bubble),
                }
            }
        }

        if let Ok(text) = result {
            self.turns.push(ChatTurn::assistant(text));
        }
        Completion::Applied
    }

    /// 生成护理方案并等待响应（独占持有管理器时使用）
    pub async fn start_routine(
        &mut self,
        products: &[&Product],
        service: &dyn CompletionService,
    ) -> Result<Completion, ConversationError> {
        let request = self.begin_routine(products)?;
        let result = service.complete(&request.turns).await;
        Ok(self.complete(&request, result))
    }

    /// 继续对话并等待响应（独占持有管理器时使用）
    ///
    /// 输入为空时返回 None，不发出请求。
    pub async fn continue_chat(
        &mut self,
        text: &str,
        service: &dyn CompletionService,
    ) -> Option<Completion> {
        let request = self.begin_chat(text)?;
        let result = service.complete(&request.turns).await;
        Some(self.complete(&request, result))
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::chat::Role;

    /// 测试用补全服务：按顺序返回预设结果，并记录收到的请求
    #[derive(Default)]
    pub(crate) struct ScriptedService {
        pub replies: Mutex<VecDeque<Result<String, CompletionError>>>,
        pub requests: Mutex<Vec<Vec<ChatTurn>>>,
    }

    impl ScriptedService {
        pub(crate) fn with(replies: Vec<Result<String, CompletionError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError> {
            self.requests.lock().unwrap().push(turns.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CompletionError::Format))
        }
    }

    pub(crate) fn server_error() -> CompletionError {
        CompletionError::Service {
            status: 500,
            body: "server error".into(),
        }
    }

    fn product(id: u64, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            brand: "Garnier".into(),
            category: "skincare".into(),
            description: "Brightening".into(),
            image: "https://img.example/secret.png".into(),
        }
    }

    fn kinds(manager: &ConversationManager) -> Vec<BubbleKind> {
        manager.window().bubbles.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_session_starts_with_greeting() {
        let manager = ConversationManager::new();
        assert_eq!(manager.turns()[0].role, Role::System);
        assert_eq!(manager.turns()[1], ChatTurn::assistant(GREETING));
        assert_eq!(kinds(&manager), vec![BubbleKind::Assistant]);
    }

    #[tokio::test]
    async fn test_empty_selection_shows_one_instruction_and_sends_nothing() {
        let service = ScriptedService::default();
        let mut manager = ConversationManager::new();

        let result = manager.start_routine(&[], &service).await;

        assert!(matches!(result, Err(ConversationError::EmptySelection)));
        assert_eq!(service.request_count(), 0);
        let window = manager.window();
        assert_eq!(window.bubbles.len(), 1);
        assert_eq!(window.bubbles[0].kind, BubbleKind::Notice);
        assert_eq!(
            window.bubbles[0].text,
            "Please select at least one product to generate a routine."
        );
    }

    #[tokio::test]
    async fn test_routine_success_resets_and_appends_reply() {
        let service = ScriptedService::with(vec![Ok("AM: serum. PM: cream.".into())]);
        let mut manager = ConversationManager::new();
        let serum = product(3, "Vitamin C Serum");

        let outcome = manager.start_routine(&[&serum], &service).await.unwrap();

        assert_eq!(outcome, Completion::Applied);
        let turns = manager.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0], ChatTurn::system(ROUTINE_SYSTEM_PROMPT));
        assert_eq!(turns[1].role, Role::User);
        assert!(turns[1].content.contains("Vitamin C Serum"));
        assert!(turns[1].content.contains("\"category\": \"skincare\""));
        assert!(!turns[1].content.contains("secret.png"));
        assert!(!turns[1].content.contains("\"id\""));
        assert_eq!(turns[2], ChatTurn::assistant("AM: serum. PM: cream."));

        assert_eq!(kinds(&manager), vec![BubbleKind::Assistant]);
        assert_eq!(service.requests.lock().unwrap()[0].len(), 2);
    }

    #[test]
    fn test_routine_in_flight_shows_generating_notice() {
        let mut manager = ConversationManager::new();
        let serum = product(3, "Serum");
        manager.begin_routine(&[&serum]).unwrap();

        let window = manager.window();
        assert_eq!(window.bubbles.len(), 1);
        assert_eq!(window.bubbles[0].text, GENERATING_MESSAGE);
    }

    #[tokio::test]
    async fn test_routine_failure_shows_error_and_keeps_sequence() {
        let mut manager = ConversationManager::new();
        let serum = product(3, "Serum");
        let request = manager.begin_routine(&[&serum]).unwrap();

        manager.complete(&request, Err(server_error()));

        assert_eq!(manager.turns(), request.turns.as_slice());
        let window = manager.window();
        assert_eq!(window.bubbles.len(), 1);
        assert_eq!(window.bubbles[0].kind, BubbleKind::Error);
        assert!(window.bubbles[0].text.contains("500"));
        assert!(window.bubbles[0].text.contains("server error"));
    }

    #[tokio::test]
    async fn test_blank_chat_input_is_noop() {
        let service = ScriptedService::default();
        let mut manager = ConversationManager::new();
        let before = manager.turns().to_vec();

        assert_eq!(manager.continue_chat("   ", &service).await, None);
        assert_eq!(manager.turns(), before.as_slice());
        assert_eq!(service.request_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_success_replaces_placeholder() {
        let service = ScriptedService::with(vec![Ok("Use SPF daily.".into())]);
        let mut manager = ConversationManager::new();

        let outcome = manager.continue_chat("  What about sunscreen? ", &service).await;

        assert_eq!(outcome, Some(Completion::Applied));
        assert_eq!(
            kinds(&manager),
            vec![BubbleKind::Assistant, BubbleKind::User, BubbleKind::Assistant]
        );
        let turns = manager.turns();
        assert_eq!(turns[turns.len() - 2], ChatTurn::user("What about sunscreen?"));
        assert_eq!(turns[turns.len() - 1], ChatTurn::assistant("Use SPF daily."));

        // 请求包含完整序列：系统指令 + 欢迎语 + 用户消息
        assert_eq!(service.requests.lock().unwrap()[0].len(), 3);
    }

    #[test]
    fn test_chat_pending_placeholder_visible_while_in_flight() {
        let mut manager = ConversationManager::new();
        manager.begin_chat("hello").unwrap();

        let window = manager.window();
        let last = window.bubbles.last().unwrap();
        assert_eq!(last.kind, BubbleKind::Pending);
        assert_eq!(last.text, PENDING_MESSAGE);
    }

    #[test]
    fn test_chat_failure_replaces_placeholder_with_error() {
        let mut manager = ConversationManager::new();
        let request = manager.begin_chat("hello").unwrap();
        let before = manager.turns().to_vec();

        manager.complete(&request, Err(server_error()));

        assert_eq!(manager.turns(), before.as_slice());
        assert_eq!(manager.turns().last().unwrap().role, Role::User);
        let window = manager.window();
        let last = window.bubbles.last().unwrap();
        assert_eq!(last.kind, BubbleKind::Error);
        assert_eq!(last.text, "Error: Worker error: 500 server error");
        assert!(!window.bubbles.iter().any(|b| b.kind == BubbleKind::Pending));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut manager = ConversationManager::new();
        let first = manager.begin_chat("first").unwrap();
        let second = manager.begin_chat("second").unwrap();
        assert!(second.seq > first.seq);

        assert_eq!(manager.complete(&first, Ok("late".into())), Completion::Discarded);
        assert!(!manager.turns().iter().any(|t| t.content == "late"));
        assert_eq!(
            manager
                .window()
                .bubbles
                .iter()
                .filter(|b| b.kind == BubbleKind::Pending)
                .count(),
            1
        );

        assert_eq!(manager.complete(&second, Ok("fresh".into())), Completion::Applied);
        assert_eq!(manager.turns().last().unwrap(), &ChatTurn::assistant("fresh"));
        assert!(!manager.window().bubbles.iter().any(|b| b.kind == BubbleKind::Pending));
    }

    #[test]
    fn test_empty_selection_notice_supersedes_in_flight_chat() {
        let mut manager = ConversationManager::new();
        let chat = manager.begin_chat("hello").unwrap();

        assert!(manager.begin_routine(&[]).is_err());
        let before = manager.turns().to_vec();

        assert_eq!(manager.complete(&chat, Ok("late reply".into())), Completion::Discarded);
        let window = manager.window();
        assert_eq!(window.bubbles.len(), 1);
        assert_eq!(window.bubbles[0].kind, BubbleKind::Notice);
        assert_eq!(manager.turns(), before.as_slice());
    }
}
