//! # 已选产品列表渲染器
//!
//! 将选购清单投影为产品记录并渲染为列表显示指令。
//! 目录中已不存在的 id（例如本地存储里残留的旧 id）会被静默丢弃。

use crate::models::product::{Product, ProductId};
use crate::models::view::{SelectedItem, SelectedListView};

/// 选购清单为空时的占位提示
pub const NO_SELECTION_MESSAGE: &str = "No products selected";

/// 按选购清单顺序查出对应的产品记录，丢弃目录中不存在的 id
pub fn project<'a>(selection: &[ProductId], catalog: &'a [Product]) -> Vec<&'a Product> {
    selection
        .iter()
        .filter_map(|id| catalog.iter().find(|p| p.id == *id))
        .collect()
}

/// 渲染已选产品列表
pub fn render(selection: &[ProductId], catalog: &[Product]) -> SelectedListView {
    let items: Vec<SelectedItem> = project(selection, catalog)
        .into_iter()
        .map(|p| SelectedItem {
            id: p.id,
            name: p.name.clone(),
            brand: p.brand.clone(),
        })
        .collect();

    if items.is_empty() {
        SelectedListView::Placeholder {
            message: NO_SELECTION_MESSAGE.to_string(),
        }
    } else {
        SelectedListView::Items { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        [(3, "Serum", "Garnier"), (5, "Toner", "Kiehl's"), (9, "Mask", "Vichy")]
            .into_iter()
            .map(|(id, name, brand)| Product {
                id,
                name: name.into(),
                brand: brand.into(),
                category: "skincare".into(),
                description: String::new(),
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_selection_renders_placeholder() {
        assert_eq!(
            render(&[], &catalog()),
            SelectedListView::Placeholder {
                message: NO_SELECTION_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_items_follow_selection_order() {
        let view = render(&[9, 3], &catalog());
        let ids: Vec<u64> = view.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![9, 3]);
        assert_eq!(view.items()[0].brand, "Vichy");
    }

    #[test]
    fn test_stale_ids_are_dropped() {
        let view = render(&[42, 5], &catalog());
        let ids: Vec<u64> = view.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5]);

        assert!(matches!(render(&[42], &catalog()), SelectedListView::Placeholder { .. }));
    }
}
