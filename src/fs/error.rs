use thiserror::Error;

use crate::disk::BlockId;

/// 文件系统错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("File already exists: {0}")]
    AlreadyExists(String), // 文件已存在，带文件名

    #[error("File not found: {0}")]
    NotFound(String), // 文件不存在，带文件名

    #[error("Not enough free blocks: need {needed}, only {available} free")]
    InsufficientSpace { needed: usize, available: u64 },

    #[error("Block index {index} out of range (disk has {total} blocks)")]
    OutOfRange { index: BlockId, total: u64 },

    #[error("Block {index} cannot hold {len} bytes (block size is {block_size})")]
    BlockOverflow {
        index: BlockId,
        len: usize,
        block_size: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File system corrupted: {0}")]
    Corrupted(String), // 元数据与块占用状态不一致
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FsError>;
