use chrono::{DateTime, Local};
use log::{info, warn};
use std::collections::HashMap;

use crate::{
    disk::{BlockId, BlockStore},
    fs::error::{FsError, Result},
    utils::{blocks_needed, now},
};

/// 一个文件的元数据
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub name: String,
    pub size: usize,          // 原始内容长度（字节）
    pub blocks: Vec<BlockId>, // 按写入顺序排列的块编号，读取时按此顺序拼接
    pub created: DateTime<Local>,
}

/// 文件名 -> FileRecord 的映射，保持插入顺序
#[derive(Debug, Clone, Default)]
pub struct FileTable {
    records: Vec<FileRecord>,
    index_map: HashMap<String, usize>, // name -> records 索引
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_map.contains_key(name)
    }

    fn rebuild_index_map(&mut self) {
        self.index_map.clear();
        for (i, record) in self.records.iter().enumerate() {
            self.index_map.insert(record.name.clone(), i);
        }
    }

    /// 创建文件：分配块、写入内容、登记元数据。
    ///
    /// 任何失败路径都不修改磁盘和表。
    pub fn create_file(&mut self, store: &mut BlockStore, name: &str, content: &[u8]) -> Result<()> {
        if self.contains(name) {
            warn!("create '{}' rejected: name already taken", name);
            return Err(FsError::AlreadyExists(name.to_string()));
        }

        let needed = blocks_needed(content.len(), store.block_size());
        let free_blocks = store.find_free_blocks(needed).map_err(|e| {
            warn!("create '{}' rejected: {}", name, e);
            e
        })?;

        for (i, (chunk, &block)) in content
            .chunks(store.block_size())
            .zip(free_blocks.iter())
            .enumerate()
        {
            if let Err(e) = store.write(block, chunk) {
                // 回滚已写入的块
                for &written in &free_blocks[..i] {
                    store.free(written)?;
                }
                return Err(e);
            }
        }

        info!(
            "created '{}' ({} bytes) in blocks {:?}",
            name,
            content.len(),
            free_blocks
        );
        self.records.push(FileRecord {
            name: name.to_string(),
            size: content.len(),
            blocks: free_blocks,
            created: now(),
        });
        self.index_map
            .insert(name.to_string(), self.records.len() - 1);
        Ok(())
    }

    /// 按块顺序拼接内容，并截断到记录的大小
    pub fn read_file(&self, store: &BlockStore, name: &str) -> Result<Vec<u8>> {
        let record = self.stat(name)?;

        let mut content = Vec::with_capacity(record.size);
        for &block in &record.blocks {
            content.extend_from_slice(store.read(block)?);
        }
        content.truncate(record.size);
        Ok(content)
    }

    /// 删除文件，归还它的所有块，返回被删除的记录
    pub fn delete_file(&mut self, store: &mut BlockStore, name: &str) -> Result<FileRecord> {
        let idx = match self.index_map.get(name) {
            Some(&idx) => idx,
            None => return Err(FsError::NotFound(name.to_string())),
        };

        for &block in &self.records[idx].blocks {
            store.free(block)?;
        }

        let record = self.records.remove(idx);
        self.rebuild_index_map();
        info!("deleted '{}', freed blocks {:?}", name, record.blocks);
        Ok(record)
    }

    /// 按插入顺序列出所有文件，空表返回空切片
    pub fn list_files(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn stat(&self, name: &str) -> Result<&FileRecord> {
        self.index_map
            .get(name)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| FsError::NotFound(name.to_string()))
    }

    /// 绕过分配直接登记一条记录，只用于构造损坏的状态
    #[cfg(test)]
    pub(crate) fn insert_record(&mut self, record: FileRecord) {
        self.index_map.insert(record.name.clone(), self.records.len());
        self.records.push(record);
    }
}
