//! # 产品目录数据模型
//!
//! 定义了产品（Product）与目录文档（ProductCatalog）的 Rust 结构体，
//! 对应前端 `products.json` 中的产品记录。
//!
//! 产品数据在加载后不可变，由目录加载器独占持有，其余模块只读访问。

use serde::{Deserialize, Serialize};

/// 产品标识符：目录内唯一且稳定的整数
pub type ProductId = u64;

/// 产品数据结构
///
/// 对应目录文档 `products` 数组中的每一条记录。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Product {
///   id: number;
///   name: string;
///   brand: string;
///   category: string;
///   description: string;
///   image: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 唯一标识符，选购清单与本地存储均以此引用产品
    pub id: ProductId,
    /// 产品名称
    pub name: String,
    /// 品牌名称
    pub brand: String,
    /// 分类（枚举式字符串，如 "cleanser"、"moisturizer"），筛选时精确匹配
    pub category: String,
    /// 产品描述，默认在卡片中折叠显示
    pub description: String,
    /// 产品图片地址
    pub image: String,
}

/// 目录文档顶层结构：`{ "products": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

/// 生成护理方案时发送给模型的产品投影
///
/// 仅保留名称、品牌、分类和描述，图片和 id 对模型没有意义，不发送。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
        }
    }
}
