//! # 已选列表 Tauri Commands
//!
//! - `remove_selected` - 已选列表中的移除按钮
//! - `clear_selection` - “Clear All” 按钮

use tauri::State;

use crate::models::product::ProductId;
use crate::models::view::SelectionUpdate;
use crate::services::advisor::Advisor;

/// 从已选列表移除单个产品
///
/// 返回刷新后的已选列表；存在筛选条件时同时返回刷新后的网格，
/// 被移除产品的卡片不再高亮。
#[tauri::command]
pub async fn remove_selected(
    id: ProductId,
    advisor: State<'_, Advisor>,
) -> Result<SelectionUpdate, String> {
    Ok(advisor.remove_selected(id).await)
}

/// 清空选购清单
#[tauri::command]
pub async fn clear_selection(advisor: State<'_, Advisor>) -> Result<SelectionUpdate, String> {
    Ok(advisor.clear_selection().await)
}
