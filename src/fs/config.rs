use crate::{
    disk::{BLOCK_SIZE, DISK_SIZE},
    fs::error::{FsError, Result},
};

/// 模拟磁盘的容量上限：256 MiB
pub const MAX_DISK_BYTES: usize = 256 * 1024 * 1024;

/// 磁盘几何参数，启动时确定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    pub block_size: usize,   // 每块大小（字节）
    pub total_blocks: usize, // 总块数
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            total_blocks: DISK_SIZE,
        }
    }
}

impl FsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(FsError::InvalidConfig(
                "block size must be greater than zero".to_string(),
            ));
        }
        if self.total_blocks == 0 {
            return Err(FsError::InvalidConfig(
                "disk must have at least one block".to_string(),
            ));
        }
        match self.block_size.checked_mul(self.total_blocks) {
            Some(bytes) if bytes <= MAX_DISK_BYTES => Ok(()),
            _ => Err(FsError::InvalidConfig(format!(
                "{} blocks x {} bytes exceeds the {} byte disk limit",
                self.total_blocks, self.block_size, MAX_DISK_BYTES
            ))),
        }
    }
}
