//! # 显示指令数据模型
//!
//! 渲染器的输出：描述“界面应当呈现什么”的独立数据结构，由前端直接绘制。
//!
//! ## 设计原则
//! - **纯函数渲染**：每个渲染器都是 (状态切片) → (显示指令) 的纯函数，
//!   任何状态变更后重新调用即可，状态转换与呈现完全解耦。
//! - **前端零逻辑**：前端不判断选中状态、不截断列表、不拼接错误文案，
//!   只按字段渲染。
//!
//! ## 数据流
//! ```text
//! 用户操作 → IPC command → Advisor（更新 SelectionStore / 条件 / 对话）
//!          → grid::render / selected_list::render / ConversationManager::window
//!          → PageView / SelectionUpdate / ChatWindowView → 前端绘制
//! ```

use serde::Serialize;

use crate::models::product::ProductId;

/// 商品网格的显示指令
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridView {
    /// 占位提示（未选择分类 / 无匹配产品 / 目录加载失败）
    Placeholder { message: String },
    /// 产品卡片列表，超出可见上限时附带展开/收起按钮
    Cards {
        cards: Vec<ProductCard>,
        #[serde(skip_serializing_if = "Option::is_none")]
        toggle: Option<ShowMoreToggle>,
    },
}

impl GridView {
    pub fn placeholder(message: impl Into<String>) -> Self {
        Self::Placeholder {
            message: message.into(),
        }
    }

    /// 当前可见的卡片（占位状态时为空）
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Cards { cards, .. } => cards,
            Self::Placeholder { .. } => &[],
        }
    }

    /// 展开/收起按钮（未超过可见上限时为 None）
    pub fn toggle(&self) -> Option<&ShowMoreToggle> {
        match self {
            Self::Cards { toggle, .. } => toggle.as_ref(),
            Self::Placeholder { .. } => None,
        }
    }
}

/// 单张产品卡片
///
/// `selected` 必须始终等于该产品 id 在选购清单中的成员关系。
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub description: String,
    /// 选中态（卡片高亮）
    pub selected: bool,
    /// 描述区是否展开（由卡片内独立的 Details 按钮切换）
    pub description_expanded: bool,
}

/// “Show More / Show Less” 切换按钮
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowMoreToggle {
    pub label: String,
    /// 当前是否已展开显示全部产品
    pub expanded: bool,
}

/// 已选产品列表的显示指令
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectedListView {
    Placeholder { message: String },
    Items { items: Vec<SelectedItem> },
}

impl SelectedListView {
    pub fn items(&self) -> &[SelectedItem] {
        match self {
            Self::Items { items } => items,
            Self::Placeholder { .. } => &[],
        }
    }
}

/// 已选列表中的单项，附带移除按钮（前端以 `id` 回传）
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SelectedItem {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
}

/// 聊天窗口中消息气泡的样式类别
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BubbleKind {
    /// 用户消息
    User,
    /// 助手回复
    Assistant,
    /// 请求进行中的临时占位（“Thinking...”），助手样式
    Pending,
    /// 请求失败的错误信息，助手样式
    Error,
    /// 无角色的提示文本（如“请先选择产品”“Generating routine...”）
    Notice,
}

/// 聊天窗口中的单个气泡
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatBubble {
    pub kind: BubbleKind,
    pub text: String,
    /// 占位气泡所属请求的序号，用于响应到达后精确替换；不发送给前端
    #[serde(skip)]
    pub request: Option<u64>,
}

impl ChatBubble {
    pub fn new(kind: BubbleKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            request: None,
        }
    }

    pub fn pending(text: impl Into<String>, request: u64) -> Self {
        Self {
            kind: BubbleKind::Pending,
            text: text.into(),
            request: Some(request),
        }
    }
}

/// 聊天窗口的显示指令
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatWindowView {
    pub bubbles: Vec<ChatBubble>,
}

/// 选购清单变化后需要刷新的视图
///
/// 同步规则：清单每次变化都重新渲染已选列表；
/// 仅当存在筛选/搜索条件时才按当前筛选结果重新渲染网格，否则网格保持占位提示。
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub grid: GridView,
    pub selected: SelectedListView,
}

/// 页面初始化时的完整视图
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub grid: GridView,
    pub selected: SelectedListView,
    pub chat: ChatWindowView,
}
