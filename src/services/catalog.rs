//! # 产品目录加载服务
//!
//! 每个会话只读取一次产品目录文档，之后的调用直接返回缓存。
//!
//! ## 缓存语义
//! - 使用 `tokio::sync::OnceCell`：并发的首次调用只会触发一次读取
//! - 仅在解析成功后整体写入缓存；失败时缓存保持为空，下次调用重新读取
//! - 缓存内容为 `Arc<[Product]>`，各渲染器共享只读视图，无需克隆整个目录

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::CatalogError;
use crate::models::product::{Product, ProductCatalog};

/// 目录文档来源
///
/// 返回未解析的原始文档文本，解析由 `CatalogLoader` 统一完成。
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<String, CatalogError>;
}

/// 从本地文件读取目录文档
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<String, CatalogError> {
        log::debug!("读取产品目录: {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// 将目录文档解析为产品列表
pub fn parse_catalog(raw: &str) -> Result<Vec<Product>, CatalogError> {
    let catalog: ProductCatalog = serde_json::from_str(raw)?;
    Ok(catalog.products)
}

/// 产品目录加载器（带一次性缓存）
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
    cache: OnceCell<Arc<[Product]>>,
}

impl CatalogLoader {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    /// 加载产品目录
    ///
    /// 首次调用读取并解析文档；之后的调用直接返回缓存，不再读取。
    ///
    /// # 错误
    /// 读取或解析失败时返回 `CatalogError`，缓存保持为空
    pub async fn load(&self) -> Result<Arc<[Product]>, CatalogError> {
        let products = self
            .cache
            .get_or_try_init(|| async {
                let raw = self.source.fetch().await?;
                let products = parse_catalog(&raw)?;
                log::info!("产品目录加载完成，共 {} 个产品", products.len());
                Ok::<_, CatalogError>(Arc::from(products))
            })
            .await?;
        Ok(Arc::clone(products))
    }

    /// 已缓存的目录（尚未成功加载时为 None）
    pub fn cached(&self) -> Option<Arc<[Product]>> {
        self.cache.get().cloned()
    }
}
