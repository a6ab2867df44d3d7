//! # 商品网格 Tauri Commands
//!
//! - `init_advisor` - 页面加载：目录、已选列表、欢迎语
//! - `set_category` / `search_products` - 分类切换与搜索输入
//! - `toggle_product` - 点击卡片翻转选中状态
//! - `toggle_description` - 展开/折叠卡片描述
//! - `toggle_show_more` - “Show More / Show Less”

use tauri::State;

use crate::models::product::ProductId;
use crate::models::view::{GridView, PageView, ProductCard, SelectionUpdate};
use crate::services::advisor::Advisor;

/// 页面初始化
///
/// 前端在页面加载时调用一次，通过一次 IPC 调用完成以下工作：
/// 1. 加载产品目录（首次调用时读取文件，之后命中缓存）
/// 2. 用已恢复的选购清单渲染已选列表，剔除目录中已不存在的 id
/// 3. 以欢迎语开始新会话
///
/// # 参数
/// - `advisor` - Tauri managed state，应用全局状态
///
/// # 返回值
/// 网格占位提示、已选列表和只含欢迎语的聊天窗口
#[tauri::command]
pub async fn init_advisor(advisor: State<'_, Advisor>) -> Result<PageView, String> {
    Ok(advisor.init().await)
}

/// 分类下拉框变化
///
/// # 参数
/// - `category` - 选中的分类；空字符串或 null 表示不限分类
/// - `advisor` - Tauri managed state
///
/// # 返回值
/// 刷新后的网格；分类与搜索词都为空时为占位提示
#[tauri::command]
pub async fn set_category(
    category: Option<String>,
    advisor: State<'_, Advisor>,
) -> Result<GridView, String> {
    Ok(advisor.set_category(category).await)
}

/// 搜索框输入（实时过滤，与分类组合）
///
/// # 参数
/// - `query` - 搜索词，在名称、品牌、描述中做不区分大小写的子串匹配
/// - `advisor` - Tauri managed state
#[tauri::command]
pub async fn search_products(
    query: Option<String>,
    advisor: State<'_, Advisor>,
) -> Result<GridView, String> {
    Ok(advisor.set_query(query).await)
}

/// 点击产品卡片（Details 按钮以外的区域）
///
/// 翻转选中状态并立即持久化，然后同时刷新网格与已选列表，
/// 保证可见卡片的高亮与选购清单一致。
///
/// # 参数
/// - `id` - 被点击卡片的产品 id；卡片当前不可见时忽略该点击
/// - `advisor` - Tauri managed state
#[tauri::command]
pub async fn toggle_product(
    id: ProductId,
    advisor: State<'_, Advisor>,
) -> Result<SelectionUpdate, String> {
    Ok(advisor.toggle_product(id).await)
}

/// 点击卡片的 Details 按钮
///
/// 只切换描述的展开状态，不影响选中状态。
///
/// # 参数
/// - `id` - 卡片对应的产品 id
/// - `advisor` - Tauri managed state
///
/// # 返回值
/// 更新后的卡片；卡片当前不可见时返回 null
#[tauri::command]
pub fn toggle_description(
    id: ProductId,
    advisor: State<'_, Advisor>,
) -> Result<Option<ProductCard>, String> {
    Ok(advisor.toggle_description(id))
}

/// 点击 “Show More / Show Less”
///
/// # 返回值
/// 展开后显示全部卡片与 “Show Less”，折叠后回到前 6 张与 “Show More”
#[tauri::command]
pub fn toggle_show_more(advisor: State<'_, Advisor>) -> Result<GridView, String> {
    Ok(advisor.toggle_show_more())
}
