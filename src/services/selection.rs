//! # 选购清单服务
//!
//! 持有用户选中的产品 id 集合，并在每次变更后立即同步写入本地键值存储。
//!
//! ## 持久化格式
//! 存储键 `selectedProductIds`，值为 id 数组的 JSON（如 `[3,5]`），按加入顺序排列。
//!
//! ## 启动水合
//! 启动时从存储读取 id 数组；键不存在或内容损坏时以空清单启动，不返回错误。

use std::collections::HashSet;

use crate::models::product::ProductId;
use crate::services::storage::KeyValueStore;

/// 选购清单在本地存储中的固定键
pub const SELECTION_STORAGE_KEY: &str = "selectedProductIds";

/// 选购清单
///
/// 只能通过 `add` / `remove` / `toggle` / `clear` 修改，
/// 每个修改操作返回前都已完成持久化写入。
pub struct SelectionStore {
    /// 已选 id，按加入顺序排列且不重复
    ids: Vec<ProductId>,
    /// 持久化后端
    storage: Box<dyn KeyValueStore>,
}

impl SelectionStore {
    /// 从存储水合选购清单
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let ids = storage
            .get_item(SELECTION_STORAGE_KEY)
            .map(|raw| parse_ids(&raw))
            .unwrap_or_default();
        log::info!("已恢复 {} 个已选产品", ids.len());
        Self { ids, storage }
    }

    /// 指定产品是否已选中
    pub fn has(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// 加入产品（已存在时保持原位置）
    pub fn add(&mut self, id: ProductId) {
        if !self.has(id) {
            self.ids.push(id);
        }
        self.persist();
    }

    /// 移除产品（不存在时为空操作，仍会写入存储）
    pub fn remove(&mut self, id: ProductId) {
        self.ids.retain(|existing| *existing != id);
        self.persist();
    }

    /// 翻转产品的选中状态，返回翻转后的成员关系
    ///
    /// 对应产品卡片的点击操作。
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.has(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// 清空选购清单
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    /// 当前选中的 id 集合
    pub fn all(&self) -> HashSet<ProductId> {
        self.ids.iter().copied().collect()
    }

    /// 按加入顺序排列的 id
    pub fn ordered(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 将当前清单写入存储
    ///
    /// 写入失败只记录日志，不回滚内存中的变更：界面状态以内存为准，
    /// 下一次成功写入会重新对齐持久化内容。
    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.ids) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("序列化选购清单失败: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(SELECTION_STORAGE_KEY, &serialized) {
            log::warn!("保存选购清单失败: {}", e);
        }
    }
}

/// 解析存储中的 id 数组，损坏时返回空清单，重复 id 只保留首次出现
fn parse_ids(raw: &str) -> Vec<ProductId> {
    let parsed: Vec<ProductId> = match serde_json::from_str(raw) {
        Ok(ids) => ids,
        Err(e) => {
            log::warn!("选购清单存储内容无法解析，以空清单启动: {}", e);
            return Vec::new();
        }
    };
    let mut seen = HashSet::new();
    parsed.into_iter().filter(|id| seen.insert(*id)).collect()
}
