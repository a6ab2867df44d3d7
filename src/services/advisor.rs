//! # 编排服务
//!
//! 组合目录加载器、选购清单、筛选引擎、两个渲染器和对话管理器，
//! 把每个用户操作转换为状态变更 + 显示指令。
//!
//! ## 同步规则
//! 选购清单每次变化后：
//! 1. 重新渲染已选列表
//! 2. 仅当存在分类/搜索条件时，按当前筛选结果重新渲染网格；
//!    否则网格保持 “Select a category to view products” 占位
//!
//! 网格渲染始终以选购清单为谓词，因此任意可见卡片的选中态都等于清单成员关系。
//!
//! ## 并发
//! Tauri command 可能在不同线程上执行，各部分状态分别由 `std::sync::Mutex` 保护，
//! 锁只在同步修改期间持有，等待网络响应前全部释放。
//! 需要同时持有多把锁时，加锁顺序固定为 view → selection → conversation。

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ConfigError;
use crate::models::filter::FilterCriteria;
use crate::models::product::{Product, ProductId};
use crate::models::settings::AdvisorConfig;
use crate::models::view::{ChatWindowView, GridView, PageView, ProductCard, SelectionUpdate};
use crate::services::catalog::{CatalogLoader, FileCatalogSource};
use crate::services::completion::{CompletionService, HttpCompletionClient};
use crate::services::conversation::ConversationManager;
use crate::services::filter::filter;
use crate::services::grid::GridState;
use crate::services::selection::SelectionStore;
use crate::services::storage::{JsonFileStore, KeyValueStore};
use crate::services::selected_list;
use crate::utils::path;

/// 未设置任何筛选条件时网格的占位提示
pub const SELECT_CATEGORY_MESSAGE: &str = "Select a category to view products";

/// 网格相关的界面状态
#[derive(Default)]
struct ViewState {
    criteria: FilterCriteria,
    grid: GridState,
}

/// 应用全局状态与操作入口
///
/// 通过 Tauri 的 `manage()` 注册，所有 command 通过 `State<Advisor>` 访问。
pub struct Advisor {
    catalog: CatalogLoader,
    selection: Mutex<SelectionStore>,
    view: Mutex<ViewState>,
    conversation: Mutex<ConversationManager>,
    completion: Arc<dyn CompletionService>,
}

/// 获取锁；持锁线程 panic 导致中毒时仍取出数据继续使用
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Advisor {
    pub fn new(
        catalog: CatalogLoader,
        storage: Box<dyn KeyValueStore>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            catalog,
            selection: Mutex::new(SelectionStore::load(storage)),
            view: Mutex::new(ViewState::default()),
            conversation: Mutex::new(ConversationManager::new()),
            completion,
        }
    }

    /// 按运行配置组装文件目录来源、JSON 文件存储和 HTTP 补全客户端
    ///
    /// # 参数
    /// - `config` - 运行配置
    /// - `base_dir` - 相对目录路径的基准目录（桌面端为应用资源目录）
    ///
    /// # 错误
    /// 未指定存储路径且无法确定系统配置目录时返回错误
    pub fn from_config(config: &AdvisorConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let store_path: PathBuf = match &config.store_path {
            Some(p) => PathBuf::from(p),
            None => path::get_default_store_path()?,
        };
        let catalog_path = path::resolve_path(base_dir, &config.catalog_path);
        log::info!(
            "产品目录: {}，本地存储文件: {}",
            catalog_path.display(),
            store_path.display()
        );

        Ok(Self::new(
            CatalogLoader::new(Box::new(FileCatalogSource::new(catalog_path))),
            Box::new(JsonFileStore::open(store_path)),
            Arc::new(HttpCompletionClient::new(config.completion_endpoint.clone())),
        ))
    }

    /// 加载产品目录；失败时记录日志并按空目录处理
    ///
    /// 目录加载失败表现为 “No products found” 等占位提示，不中断界面。
    async fn products(&self) -> Arc<[Product]> {
        match self.catalog.load().await {
            Ok(products) => products,
            Err(e) => {
                log::error!("{}", e);
                Arc::from(Vec::new())
            }
        }
    }

    /// 按当前条件刷新网格
    fn refresh_grid(catalog: &[Product], view: &mut ViewState, selection: &SelectionStore) -> GridView {
        if view.criteria.is_active() {
            view.grid.show(filter(catalog, &view.criteria));
            view.grid.render(|id| selection.has(id))
        } else {
            view.grid.clear();
            GridView::placeholder(SELECT_CATEGORY_MESSAGE)
        }
    }

    /// 选购清单变化后的同步刷新
    fn selection_update(catalog: &[Product], view: &mut ViewState, selection: &SelectionStore) -> SelectionUpdate {
        SelectionUpdate {
            grid: Self::refresh_grid(catalog, view, selection),
            selected: selected_list::render(selection.ordered(), catalog),
        }
    }

    /// 页面初始化
    ///
    /// 1. 加载产品目录（失败时按空目录处理）
    /// 2. 清除筛选条件和网格交互状态，网格回到占位提示
    /// 3. 用启动时恢复的选购清单渲染已选列表，目录中不存在的 id 被跳过
    /// 4. 以欢迎语开始新会话，丢弃此前的对话
    pub async fn init(&self) -> PageView {
        let catalog = self.products().await;

        let mut view = lock(&self.view);
        *view = ViewState::default();
        let selection = lock(&self.selection);
        let update = Self::selection_update(&catalog, &mut view, &selection);

        let mut conversation = lock(&self.conversation);
        *conversation = ConversationManager::new();

        PageView {
            grid: update.grid,
            selected: update.selected,
            chat: conversation.window(),
        }
    }

    /// 切换分类
    ///
    /// 保留当前搜索词，两者组合筛选。同一筛选结果下 “Show More” 与描述展开状态保持不变，
    /// 结果变化时重置。
    ///
    /// # 参数
    /// - `category` - 新分类；None 或空白表示不限分类
    pub async fn set_category(&self, category: Option<String>) -> GridView {
        let catalog = self.products().await;
        let mut view = lock(&self.view);
        view.criteria.category = category;
        let selection = lock(&self.selection);
        Self::refresh_grid(&catalog, &mut view, &selection)
    }

    /// 更新搜索关键字（与分类组合筛选）
    ///
    /// # 参数
    /// - `query` - 新搜索词；None 或空白表示不限关键字
    pub async fn set_query(&self, query: Option<String>) -> GridView {
        let catalog = self.products().await;
        let mut view = lock(&self.view);
        view.criteria.query = query;
        let selection = lock(&self.selection);
        Self::refresh_grid(&catalog, &mut view, &selection)
    }

    /// 点击产品卡片：翻转选中状态
    ///
    /// 1. 仅当卡片在当前网格中可见时翻转，否则记录日志并忽略
    /// 2. 选购清单在返回前已完成持久化写入
    /// 3. 按同步规则刷新网格与已选列表
    pub async fn toggle_product(&self, id: ProductId) -> SelectionUpdate {
        let catalog = self.products().await;
        let mut view = lock(&self.view);
        let mut selection = lock(&self.selection);
        if view.grid.select_card(id, &mut selection).is_none() {
            log::warn!("忽略不可见卡片的点击: {}", id);
        }
        Self::selection_update(&catalog, &mut view, &selection)
    }

    /// 展开/折叠卡片描述（不影响选中状态），卡片不可见时返回 None
    pub fn toggle_description(&self, id: ProductId) -> Option<ProductCard> {
        let mut view = lock(&self.view);
        view.grid.toggle_description(id)?;
        let selection = lock(&self.selection);
        view.grid.card(id, |pid| selection.has(pid))
    }

    /// 切换 “Show More / Show Less”
    pub fn toggle_show_more(&self) -> GridView {
        let mut view = lock(&self.view);
        if !view.criteria.is_active() {
            return GridView::placeholder(SELECT_CATEGORY_MESSAGE);
        }
        view.grid.toggle_expanded();
        let selection = lock(&self.selection);
        view.grid.render(|id| selection.has(id))
    }

    /// 从已选列表移除产品
    ///
    /// 产品不在清单中时为空操作；无论如何都按同步规则刷新网格与已选列表，
    /// 被移除产品的卡片若可见则不再高亮。
    pub async fn remove_selected(&self, id: ProductId) -> SelectionUpdate {
        let catalog = self.products().await;
        let mut view = lock(&self.view);
        let mut selection = lock(&self.selection);
        selection.remove(id);
        Self::selection_update(&catalog, &mut view, &selection)
    }

    /// 清空选购清单
    ///
    /// 持久化内容变为空数组，已选列表显示 “No products selected”，
    /// 所有可见卡片取消高亮。
    pub async fn clear_selection(&self) -> SelectionUpdate {
        let catalog = self.products().await;
        let mut view = lock(&self.view);
        let mut selection = lock(&self.selection);
        selection.clear();
        Self::selection_update(&catalog, &mut view, &selection)
    }

    /// 当前聊天窗口
    pub fn chat_window(&self) -> ChatWindowView {
        lock(&self.conversation).window()
    }

    /// 以当前选购清单生成护理方案
    ///
    /// 1. 按加入顺序把选购清单投影为产品（跳过目录中不存在的 id）
    /// 2. 在锁内重置对话并登记请求，随后释放所有锁
    /// 3. 等待补全响应；此期间其他操作可以继续执行
    /// 4. 响应到达后重新加锁写回，已被更新请求取代的响应被丢弃
    ///
    /// `on_pending` 在请求发出后、等待响应前调用一次，传入进行中的聊天窗口，
    /// 供界面立即显示 “Generating routine...”。
    /// 未选择产品时只显示提示，不发出请求，也不调用 `on_pending`。
    pub async fn generate_routine(&self, on_pending: impl FnOnce(ChatWindowView) + Send) -> ChatWindowView {
        let catalog = self.products().await;

        let (request, pending) = {
            let selection = lock(&self.selection);
            let products = selected_list::project(selection.ordered(), &catalog);
            let mut conversation = lock(&self.conversation);
            match conversation.begin_routine(&products) {
                Ok(request) => (request, conversation.window()),
                Err(e) => {
                    log::info!("{}", e);
                    return conversation.window();
                }
            }
        };
        on_pending(pending);

        let result = self.completion.complete(&request.turns).await;

        let mut conversation = lock(&self.conversation);
        conversation.complete(&request, result);
        conversation.window()
    }

    /// 发送后续对话消息
    ///
    /// 用户消息与 “Thinking...” 占位先写入聊天窗口，并通过 `on_pending` 推送；
    /// 响应到达后占位被替换为回复或错误信息。
    /// 输入为空白时不发出请求，直接返回当前聊天窗口。
    pub async fn send_message(&self, text: &str, on_pending: impl FnOnce(ChatWindowView) + Send) -> ChatWindowView {
        let (request, pending) = {
            let mut conversation = lock(&self.conversation);
            match conversation.begin_chat(text) {
                Some(request) => (request, conversation.window()),
                None => return conversation.window(),
            }
        };
        on_pending(pending);

        let result = self.completion.complete(&request.turns).await;

        let mut conversation = lock(&self.conversation);
        conversation.complete(&request, result);
        conversation.window()
    }
}
