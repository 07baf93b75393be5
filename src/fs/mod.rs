use log::{debug, info};
use std::collections::HashMap;

use crate::{
    disk::{BlockId, BlockStore},
    fs::{
        config::FsConfig,
        error::{FsError, Result},
        file_table::{FileRecord, FileTable},
    },
    utils::blocks_needed,
};

pub mod config;
pub mod error;
pub mod file_table;

/// 磁盘使用情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub block_size: usize,
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Debug)]
pub struct FileSystem {
    store: BlockStore, // 底层块存储
    table: FileTable,  // 文件元数据表
}

impl FileSystem {
    pub fn new(config: FsConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "formatted disk: {} blocks x {} bytes",
            config.total_blocks, config.block_size
        );
        Ok(Self {
            store: BlockStore::new(&config),
            table: FileTable::new(),
        })
    }

    pub fn create_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.table.create_file(&mut self.store, name, content)
    }

    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self.table.read_file(&self.store, name)
    }

    pub fn delete_file(&mut self, name: &str) -> Result<FileRecord> {
        self.table.delete_file(&mut self.store, name)
    }

    pub fn list_files(&self) -> &[FileRecord] {
        self.table.list_files()
    }

    pub fn stat(&self, name: &str) -> Result<&FileRecord> {
        self.table.stat(name)
    }

    pub fn usage(&self) -> Usage {
        Usage {
            block_size: self.store.block_size(),
            total: self.store.total_blocks(),
            used: self.store.used_count(),
            free: self.store.free_count(),
        }
    }

    /// 删除所有文件，每删除一个回调一次，返回删除的文件数
    pub fn format(&mut self, mut on_removed: impl FnMut(&FileRecord)) -> Result<usize> {
        if self.table.is_empty() {
            return Ok(0);
        }

        let names: Vec<String> = self.list_files().iter().map(|r| r.name.clone()).collect();
        for name in &names {
            let record = self.delete_file(name)?;
            on_removed(&record);
        }
        info!("format removed {} files", names.len());
        Ok(names.len())
    }

    /// 检查元数据与块占用状态是否一致，返回发现的第一个问题
    pub fn check(&self) -> Result<()> {
        let block_size = self.store.block_size();
        let mut owners: HashMap<BlockId, &str> = HashMap::new();

        for record in self.table.list_files() {
            let expected = blocks_needed(record.size, block_size);
            if record.blocks.len() != expected {
                return Err(FsError::Corrupted(format!(
                    "'{}' has {} bytes but {} blocks (expected {})",
                    record.name,
                    record.size,
                    record.blocks.len(),
                    expected
                )));
            }

            for &block in &record.blocks {
                if !self.store.is_used(block)? {
                    return Err(FsError::Corrupted(format!(
                        "'{}' references free block {}",
                        record.name, block
                    )));
                }
                if let Some(other) = owners.insert(block, record.name.as_str()) {
                    return Err(FsError::Corrupted(format!(
                        "block {} is shared by '{}' and '{}'",
                        block, other, record.name
                    )));
                }
            }
        }

        if let Some(orphan) = self.store.used_blocks().find(|b| !owners.contains_key(b)) {
            return Err(FsError::Corrupted(format!(
                "block {} is occupied but owned by no file",
                orphan
            )));
        }

        debug!(
            "check passed: {} files, {} blocks in use",
            self.table.len(),
            owners.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_fs() -> FileSystem {
        FileSystem::new(FsConfig {
            block_size: 128,
            total_blocks: 4,
        })
        .unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = FileSystem::new(FsConfig {
            block_size: 0,
            total_blocks: 4,
        })
        .unwrap_err();
        assert!(matches!(err, FsError::InvalidConfig(_)));

        // 乘积溢出时在分配之前就被拒绝
        let err = FileSystem::new(FsConfig {
            block_size: usize::MAX / 2,
            total_blocks: 4,
        })
        .unwrap_err();
        assert!(matches!(err, FsError::InvalidConfig(_)));
    }

    #[test]
    fn fresh_fs_lists_nothing() {
        let fs = FileSystem::new(FsConfig::default()).unwrap();
        assert!(fs.list_files().is_empty());
        assert_eq!(
            fs.usage(),
            Usage {
                block_size: 128,
                total: 1024,
                used: 0,
                free: 1024
            }
        );
        assert!(fs.check().is_ok());
    }

    #[test]
    fn usage_follows_create_and_delete() {
        let mut fs = tiny_fs();
        fs.create_file("a", &[0u8; 200]).unwrap();
        assert_eq!(fs.usage().used, 2);
        assert_eq!(fs.usage().free, 2);

        fs.delete_file("a").unwrap();
        assert_eq!(fs.usage().used, 0);
        assert!(fs.check().is_ok());
    }

    #[test]
    fn format_removes_everything() {
        let mut fs = tiny_fs();
        fs.create_file("a", b"one").unwrap();
        fs.create_file("b", b"two").unwrap();

        let mut removed = Vec::new();
        assert_eq!(fs.format(|r| removed.push(r.name.clone())).unwrap(), 2);
        assert_eq!(removed, vec!["a", "b"]);
        assert!(fs.list_files().is_empty());
        assert_eq!(fs.usage().free, 4);
    }

    #[test]
    fn check_passes_after_mixed_operations() {
        let mut fs = tiny_fs();
        fs.create_file("a", &[1u8; 130]).unwrap();
        fs.create_file("b", b"b").unwrap();
        fs.delete_file("a").unwrap();
        fs.create_file("c", &[3u8; 256]).unwrap();
        assert!(fs.check().is_ok());
    }

    #[test]
    fn check_detects_orphan_block() {
        let mut fs = tiny_fs();
        fs.create_file("a", b"a").unwrap();
        fs.store.write(3, b"stray").unwrap();

        let err = fs.check().unwrap_err();
        assert_eq!(
            err,
            FsError::Corrupted("block 3 is occupied but owned by no file".to_string())
        );
    }

    #[test]
    fn check_detects_reference_to_free_block() {
        let mut fs = tiny_fs();
        fs.create_file("a", &[0u8; 200]).unwrap();
        fs.store.free(1).unwrap();
        assert!(matches!(fs.check(), Err(FsError::Corrupted(_))));
    }

    #[test]
    fn check_detects_shared_block() {
        let mut fs = tiny_fs();
        fs.create_file("a", b"a").unwrap();

        let mut forged = fs.stat("a").unwrap().clone();
        forged.name = "c".to_string();
        fs.table.insert_record(forged);

        assert_eq!(
            fs.check().unwrap_err(),
            FsError::Corrupted("block 0 is shared by 'a' and 'c'".to_string())
        );
    }

    #[test]
    fn check_detects_wrong_block_count() {
        let mut fs = tiny_fs();
        fs.create_file("a", &[0u8; 10]).unwrap();

        let mut forged = fs.stat("a").unwrap().clone();
        forged.name = "b".to_string();
        forged.size = 300;
        forged.blocks = vec![];
        fs.table.insert_record(forged);

        assert!(matches!(fs.check(), Err(FsError::Corrupted(msg)) if msg.contains("'b'")));
    }
}
