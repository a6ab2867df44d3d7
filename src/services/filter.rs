//! # 筛选引擎
//!
//! 纯函数：根据分类与搜索条件从目录派生筛选视图，保持目录原有顺序。
//!
//! ## 匹配规则
//! - 分类：非空时对 `category` 字段精确匹配
//! - 搜索词：非空时在 `"{name} {brand} {description}"` 的小写文本上做子串匹配，
//!   使用 `memchr::memmem::Finder` 加速
//! - 两者同时存在时取交集；都为空时返回完整目录

use memchr::memmem;

use crate::models::filter::FilterCriteria;
use crate::models::product::Product;

/// 按条件筛选目录
pub fn filter(catalog: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let category = criteria.category();
    let needle = criteria.query().map(str::to_lowercase);
    let finder = needle.as_deref().map(|n| memmem::Finder::new(n.as_bytes()));

    catalog
        .iter()
        .filter(|product| category.is_none_or(|c| product.category == c))
        .filter(|product| {
            finder
                .as_ref()
                .is_none_or(|f| f.find(search_text(product).as_bytes()).is_some())
        })
        .cloned()
        .collect()
}

/// 产品的小写可搜索文本
fn search_text(product: &Product) -> String {
    format!(
        "{} {} {}",
        product.name, product.brand, product.description
    )
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn product(id: u64, name: &str, brand: &str, category: &str, description: &str) -> Product {
        Product {
            id,
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            description: description.into(),
            image: format!("{id}.png"),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Hydrating Cleanser", "CeraVe", "cleanser", "Removes dirt"),
            product(2, "Revitalift Serum", "L'Oreal", "skincare", "Hyaluronic acid"),
            product(3, "Foaming Cleanser", "La Roche-Posay", "cleanser", "Oil control"),
            product(4, "Lash Paradise", "L'Oreal", "makeup", "Volumizing mascara"),
            product(5, "Micellar Water", "Garnier", "cleanser", "No rinse, hydrating"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    fn criteria(category: Option<&str>, query: Option<&str>) -> FilterCriteria {
        FilterCriteria {
            category: category.map(String::from),
            query: query.map(String::from),
        }
    }

    #[test]
    fn test_empty_criteria_returns_full_catalog() {
        assert_eq!(ids(&filter(&catalog(), &FilterCriteria::default())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_category_is_exact_match() {
        assert_eq!(ids(&filter(&catalog(), &criteria(Some("cleanser"), None))), vec![1, 3, 5]);
        assert!(filter(&catalog(), &criteria(Some("clean"), None)).is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_brand_description() {
        assert_eq!(ids(&filter(&catalog(), &criteria(None, Some("L'OREAL")))), vec![2, 4]);
        assert_eq!(ids(&filter(&catalog(), &criteria(None, Some("hydrating")))), vec![1, 5]);
        assert_eq!(ids(&filter(&catalog(), &criteria(None, Some("mascara")))), vec![4]);
    }

    #[test]
    fn test_filters_apply_conjunctively() {
        let result = filter(&catalog(), &criteria(Some("cleanser"), Some("hydrat")));
        assert_eq!(ids(&result), vec![1, 5]);
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            (
                "[A-Za-z ]{0,12}",
                "[A-Za-z']{1,8}",
                prop::sample::select(vec!["cleanser", "skincare", "makeup"]),
                "[A-Za-z ,]{0,20}",
            ),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, brand, category, description))| {
                    product(i as u64, &name, &brand, category, &description)
                })
                .collect()
        })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of(prop::sample::select(vec!["cleanser", "skincare", "makeup", "suncare", " "])),
            prop::option::of("[A-Za-z ]{0,3}"),
        )
            .prop_map(|(category, query)| FilterCriteria {
                category: category.map(String::from),
                query,
            })
    }

    proptest! {
        /// 结果是目录的保序子序列，且恰好包含满足全部条件的产品
        #[test]
        fn result_is_ordered_subsequence_of_matching_products(
            catalog in arb_catalog(),
            k in arb_criteria()
        ) {
            let result = filter(&catalog, &k);

            let expected: Vec<u64> = catalog
                .iter()
                .filter(|p| k.category().is_none_or(|c| p.category == c))
                .filter(|p| {
                    k.query()
                        .is_none_or(|q| search_text(p).contains(&q.to_lowercase()))
                })
                .map(|p| p.id)
                .collect();
            prop_assert_eq!(ids(&result), expected);

            if !k.is_active() {
                prop_assert_eq!(result.len(), catalog.len());
            }
        }
    }
}
