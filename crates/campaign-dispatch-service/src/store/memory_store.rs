//! 内存存储
//!
//! 使用 DashMap 实现的高并发内存存储，适用于测试和开发环境。
//! 每条记录带插入序号，有序读取按插入顺序返回，保证客群解析
//! 结果在重复调用间稳定。

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 通用内存存储
///
/// 基于 DashMap 实现，读取返回数据克隆，不持有锁。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, (u64, T)>>,
    next_seq: Arc<AtomicU64>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            next_seq: Arc::clone(&self.next_seq),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 插入或更新数据
    ///
    /// 已存在的 key 覆盖数据但保留原插入序号，更新不改变记录位置
    pub fn insert(&self, id: &str, value: T) {
        let seq = match self.data.get(id) {
            Some(entry) => entry.0,
            None => self.next_seq.fetch_add(1, Ordering::SeqCst),
        };
        self.data.insert(id.to_string(), (seq, value));
    }

    /// 获取数据
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|entry| entry.1.clone())
    }

    /// 原地更新数据
    ///
    /// 记录存在时应用变更函数并返回更新后的克隆
    pub fn update<F>(&self, id: &str, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut entry = self.data.get_mut(id)?;
        mutate(&mut entry.1);
        Some(entry.1.clone())
    }

    /// 删除数据
    pub fn remove(&self, id: &str) -> Option<T> {
        self.data.remove(id).map(|(_, (_, value))| value)
    }

    /// 按插入顺序列出所有数据
    pub fn list_ordered(&self) -> Vec<T> {
        let mut entries: Vec<(u64, T)> = self
            .data
            .iter()
            .map(|entry| (entry.0, entry.1.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, value)| value).collect()
    }

    /// 按条件筛选数据（插入顺序）
    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut entries: Vec<(u64, T)> = self
            .data
            .iter()
            .filter(|entry| predicate(&entry.1))
            .map(|entry| (entry.0, entry.1.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, value)| value).collect()
    }

    /// 统计满足条件的记录数
    pub fn count_by<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.data.iter().filter(|entry| predicate(&entry.1)).count()
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// 检查是否存在指定 key
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// 清空所有数据
    pub fn clear(&self) {
        self.data.clear();
    }
}
