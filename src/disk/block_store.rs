use log::{debug, trace};

use crate::{
    disk::{bitmap::BlockBitmap, types::BlockId},
    fs::{
        config::FsConfig,
        error::{FsError, Result},
    },
};

/// 模拟磁盘：固定数量的块槽位，每个槽位最多存放一个块的原始字节
#[derive(Debug, Clone)]
pub struct BlockStore {
    data: Vec<u8>,       // 扁平化存储，槽位 i 占 [i * block_size, (i + 1) * block_size)
    lens: Vec<usize>,    // 每个槽位实际写入的字节数
    bitmap: BlockBitmap, // 块占用信息
    block_size: usize,
}

impl BlockStore {
    pub fn new(config: &FsConfig) -> Self {
        Self {
            data: vec![0u8; config.total_blocks * config.block_size],
            lens: vec![0; config.total_blocks],
            bitmap: BlockBitmap::new(config.total_blocks as u64),
            block_size: config.block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn total_blocks(&self) -> u64 {
        self.bitmap.total_blocks()
    }

    pub fn free_count(&self) -> u64 {
        self.bitmap.free_blocks()
    }

    pub fn used_count(&self) -> u64 {
        self.total_blocks() - self.free_count()
    }

    pub fn is_used(&self, index: BlockId) -> Result<bool> {
        self.check_range(index)?;
        Ok(self.bitmap.is_used(index))
    }

    /// 所有已占用的块编号（升序）
    pub fn used_blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.bitmap.used()
    }

    /// 首次适配：按编号升序取前 `n` 个空闲块。
    ///
    /// 纯查询，不做任何预留。空闲块不足时返回 `InsufficientSpace`，
    /// 不会返回部分结果。
    pub fn find_free_blocks(&self, n: usize) -> Result<Vec<BlockId>> {
        let found = self
            .bitmap
            .first_free(n)
            .ok_or_else(|| FsError::InsufficientSpace {
                needed: n,
                available: self.free_count(),
            })?;
        debug!("found {} free blocks: {:?}", n, found);
        Ok(found)
    }

    /// 覆盖写入一个槽位，并将其标记为已占用。
    ///
    /// 调用方必须独占该编号。写入的字节原样保存，不做填充。
    pub fn write(&mut self, index: BlockId, buf: &[u8]) -> Result<()> {
        self.check_range(index)?;
        if buf.len() > self.block_size {
            return Err(FsError::BlockOverflow {
                index,
                len: buf.len(),
                block_size: self.block_size,
            });
        }

        let start = index as usize * self.block_size;
        self.data[start..start + buf.len()].copy_from_slice(buf);
        self.data[start + buf.len()..start + self.block_size].fill(0);
        self.lens[index as usize] = buf.len();
        self.bitmap.set(index);

        trace!("wrote {} bytes to block {}", buf.len(), index);
        Ok(())
    }

    /// 清空槽位；对已空闲的块调用是空操作
    pub fn free(&mut self, index: BlockId) -> Result<()> {
        self.check_range(index)?;

        let start = index as usize * self.block_size;
        self.data[start..start + self.block_size].fill(0);
        self.lens[index as usize] = 0;
        if self.bitmap.clear(index) {
            trace!("freed block {}", index);
        }
        Ok(())
    }

    /// 返回槽位当前内容，空闲块返回空切片
    pub fn read(&self, index: BlockId) -> Result<&[u8]> {
        self.check_range(index)?;
        let start = index as usize * self.block_size;
        Ok(&self.data[start..start + self.lens[index as usize]])
    }

    fn check_range(&self, index: BlockId) -> Result<()> {
        if index >= self.total_blocks() {
            return Err(FsError::OutOfRange {
                index,
                total: self.total_blocks(),
            });
        }
        Ok(())
    }
}
