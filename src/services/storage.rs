//! # 本地键值存储服务
//!
//! 浏览器 `localStorage` 的桌面端等价物：以字符串为键、字符串为值的持久化存储。
//!
//! - `JsonFileStore`：整个存储序列化为一个 JSON 对象文件，每次写入都同步落盘
//! - `MemoryStore`：进程内存储，用于测试和未配置存储路径的场景
//!
//! ## 同步写入
//! 写操作使用 `std::fs` 同步完成，调用返回时数据已落盘，
//! 保证“内存状态变更后紧接着完成持久化”的顺序关系。

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// 键值存储抽象
///
/// 读操作不返回错误：键不存在与存储不可读对调用方是同一种情况。
pub trait KeyValueStore: Send {
    /// 读取指定键的值，不存在时返回 None
    fn get_item(&self, key: &str) -> Option<String>;

    /// 写入指定键的值并持久化
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 基于 JSON 文件的键值存储
///
/// 文件格式：`{ "key": "value", ... }`。
/// 打开时一次性读入内存，之后每次写入都整体覆写文件。
pub struct JsonFileStore {
    /// 存储文件路径
    path: PathBuf,
    /// 内存中的键值镜像（BTreeMap 使文件内容顺序稳定）
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// 打开（或新建）存储文件
    ///
    /// 文件不存在或内容损坏时以空存储启动，不返回错误，
    /// 与浏览器对损坏的 localStorage 的容错行为一致。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("本地存储文件已损坏，以空存储启动: {} ({})", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    /// 将内存镜像整体写入文件
    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// 进程内键值存储
///
/// 克隆后的实例共享同一份数据，测试可以保留一个句柄来检查写入结果。
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
