//! # 对话 Tauri Commands
//!
//! - `generate_routine` - “Generate Routine” 按钮
//! - `send_chat_message` - 聊天输入框提交
//!
//! 请求发出后先通过 `chat-window` 事件推送进行中的聊天窗口
//! （“Generating routine...” / “Thinking...”），响应到达后由 command 返回值给出最终窗口。

use tauri::{AppHandle, Emitter, State};

use crate::models::view::ChatWindowView;
use crate::services::advisor::Advisor;

/// 推送进行中聊天窗口的事件名
pub const CHAT_WINDOW_EVENT: &str = "chat-window";

fn emit_pending(app: &AppHandle, window: ChatWindowView) {
    if let Err(e) = app.emit(CHAT_WINDOW_EVENT, &window) {
        log::warn!("推送聊天窗口事件失败: {}", e);
    }
}

/// 以当前选购清单生成护理方案
///
/// 未选择产品时返回只含一条提示的聊天窗口，不发出请求。
/// 补全失败以助手样式的错误消息显示在窗口中，不作为 command 错误返回。
#[tauri::command]
pub async fn generate_routine(
    app: AppHandle,
    advisor: State<'_, Advisor>,
) -> Result<ChatWindowView, String> {
    Ok(advisor
        .generate_routine(|window| emit_pending(&app, window))
        .await)
}

/// 发送后续对话消息
///
/// # 参数
/// - `text` - 用户输入（首尾空白会被去除；为空时不发出请求）
#[tauri::command]
pub async fn send_chat_message(
    text: String,
    app: AppHandle,
    advisor: State<'_, Advisor>,
) -> Result<ChatWindowView, String> {
    Ok(advisor
        .send_message(&text, |window| emit_pending(&app, window))
        .await)
}
