//! # 商品网格渲染器
//!
//! 将产品列表渲染为网格显示指令：
//! - 初始最多显示 `VISIBLE_LIMIT` 张卡片，超出时附加 “Show More / Show Less” 切换按钮
//! - 每张卡片的选中态由选购清单谓词决定
//! - 每张卡片的描述区可独立展开/折叠，与选中态互不影响
//!
//! `GridState` 保存当前展示的产品列表和交互状态（是否展开全部、展开了哪些描述），
//! 渲染始终从状态重新计算，因此单张卡片的切换无需整体重建网格。

use std::collections::HashSet;

use crate::models::product::{Product, ProductId};
use crate::models::view::{GridView, ProductCard, ShowMoreToggle};
use crate::services::selection::SelectionStore;

/// 收起状态下可见的卡片数量上限
pub const VISIBLE_LIMIT: usize = 6;

pub const SHOW_MORE_LABEL: &str = "Show More";
pub const SHOW_LESS_LABEL: &str = "Show Less";

/// 产品列表为空时的占位提示
pub const NO_PRODUCTS_MESSAGE: &str = "No products found";

/// 以初始交互状态（收起、描述全部折叠）渲染产品列表
pub fn render(products: &[Product], is_selected: impl Fn(ProductId) -> bool) -> GridView {
    render_with(products, false, &HashSet::new(), is_selected)
}

fn render_with(
    products: &[Product],
    expanded: bool,
    open_descriptions: &HashSet<ProductId>,
    is_selected: impl Fn(ProductId) -> bool,
) -> GridView {
    if products.is_empty() {
        return GridView::placeholder(NO_PRODUCTS_MESSAGE);
    }

    let limit = if expanded { products.len() } else { VISIBLE_LIMIT };
    let cards = products
        .iter()
        .take(limit)
        .map(|p| build_card(p, is_selected(p.id), open_descriptions.contains(&p.id)))
        .collect();

    let toggle = (products.len() > VISIBLE_LIMIT).then(|| ShowMoreToggle {
        label: (if expanded { SHOW_LESS_LABEL } else { SHOW_MORE_LABEL }).to_string(),
        expanded,
    });

    GridView::Cards { cards, toggle }
}

fn build_card(product: &Product, selected: bool, description_expanded: bool) -> ProductCard {
    ProductCard {
        id: product.id,
        name: product.name.clone(),
        brand: product.brand.clone(),
        image: product.image.clone(),
        description: product.description.clone(),
        selected,
        description_expanded,
    }
}

/// 网格交互状态
#[derive(Debug, Default)]
pub struct GridState {
    /// 当前展示的产品（筛选结果）
    products: Vec<Product>,
    /// 是否已展开显示全部产品
    expanded: bool,
    /// 描述区处于展开状态的产品 id
    open_descriptions: HashSet<ProductId>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换到新的产品列表
    ///
    /// 列表内容（按 id 序列比较）发生变化时重置展开状态和描述展开状态；
    /// 同一列表重新渲染时保留用户的交互状态。
    pub fn show(&mut self, products: Vec<Product>) {
        let unchanged = self.products.len() == products.len()
            && self.products.iter().zip(&products).all(|(a, b)| a.id == b.id);
        if !unchanged {
            self.expanded = false;
            self.open_descriptions.clear();
        }
        self.products = products;
    }

    /// 清空网格（回到占位状态）
    pub fn clear(&mut self) {
        self.show(Vec::new());
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// 切换 “Show More / Show Less”，返回切换后的展开状态
    ///
    /// 产品数量未超过可见上限时没有切换按钮，保持收起。
    pub fn toggle_expanded(&mut self) -> bool {
        if self.products.len() > VISIBLE_LIMIT {
            self.expanded = !self.expanded;
        }
        self.expanded
    }

    /// 指定产品的卡片当前是否可见
    pub fn is_visible(&self, id: ProductId) -> bool {
        let limit = if self.expanded { self.products.len() } else { VISIBLE_LIMIT };
        self.products.iter().take(limit).any(|p| p.id == id)
    }

    /// 切换卡片描述区，返回切换后的展开状态；卡片不可见时返回 None
    pub fn toggle_description(&mut self, id: ProductId) -> Option<bool> {
        if !self.is_visible(id) {
            return None;
        }
        if self.open_descriptions.remove(&id) {
            Some(false)
        } else {
            self.open_descriptions.insert(id);
            Some(true)
        }
    }

    /// 点击卡片：翻转该产品在选购清单中的成员关系，返回更新后的卡片
    ///
    /// 卡片不可见时不修改选购清单，返回 None。
    pub fn select_card(&self, id: ProductId, selection: &mut SelectionStore) -> Option<ProductCard> {
        if !self.is_visible(id) {
            return None;
        }
        selection.toggle(id);
        self.card(id, |pid| selection.has(pid))
    }

    /// 单张可见卡片的显示指令
    pub fn card(&self, id: ProductId, is_selected: impl Fn(ProductId) -> bool) -> Option<ProductCard> {
        if !self.is_visible(id) {
            return None;
        }
        self.products
            .iter()
            .find(|p| p.id == id)
            .map(|p| build_card(p, is_selected(id), self.open_descriptions.contains(&id)))
    }

    /// 按当前交互状态渲染网格
    pub fn render(&self, is_selected: impl Fn(ProductId) -> bool) -> GridView {
        render_with(&self.products, self.expanded, &self.open_descriptions, is_selected)
    }
}
