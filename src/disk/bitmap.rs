use crate::disk::types::BlockId;

/// 块占用位图，每个 bit 表示一个块是否被使用
#[derive(Debug, Clone)]
pub struct BlockBitmap {
    bits: Vec<u8>,     // 位图数据
    total_blocks: u64, // 块总数
    free_blocks: u64,  // 当前空闲块数
}

impl BlockBitmap {
    // 创建一个新的位图（所有位清零 = 空闲）
    pub fn new(total_blocks: u64) -> Self {
        let byte_len = ((total_blocks + 7) / 8) as usize;

        Self {
            bits: vec![0; byte_len],
            total_blocks,
            free_blocks: total_blocks,
        }
    }

    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }

    pub fn free_blocks(&self) -> u64 {
        self.free_blocks
    }

    /// 按编号升序扫描，收集前 `n` 个空闲块。
    ///
    /// 只是查询，不修改位图；空闲块不足 `n` 个时返回 `None`。
    pub fn first_free(&self, n: usize) -> Option<Vec<BlockId>> {
        if (n as u64) > self.free_blocks {
            return None;
        }

        let mut found = Vec::with_capacity(n);
        if n == 0 {
            return Some(found);
        }

        for (byte_index, byte) in self.bits.iter().enumerate() {
            if *byte == 0xFF {
                continue;
            }
            for bit in 0..8 {
                let block = (byte_index * 8 + bit) as u64;
                // 最后一个字节的填充位不对应真实的块
                if block >= self.total_blocks {
                    return None;
                }
                if *byte & (1 << bit) == 0 {
                    found.push(block);
                    if found.len() == n {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    // 标记为已用，返回此前是否空闲
    pub fn set(&mut self, block_index: BlockId) -> bool {
        let (byte_index, bit_index) = Self::locate(block_index);

        if self.bits[byte_index] & (1 << bit_index) == 0 {
            self.bits[byte_index] |= 1 << bit_index;
            self.free_blocks -= 1;
            true
        } else {
            false
        }
    }

    // 释放一个块，重复释放是空操作
    pub fn clear(&mut self, block_index: BlockId) -> bool {
        let (byte_index, bit_index) = Self::locate(block_index);

        if self.bits[byte_index] & (1 << bit_index) != 0 {
            self.bits[byte_index] &= !(1 << bit_index);
            self.free_blocks += 1;
            true
        } else {
            false
        }
    }

    pub fn is_used(&self, block_index: BlockId) -> bool {
        let (byte_index, bit_index) = Self::locate(block_index);
        self.bits[byte_index] & (1 << bit_index) != 0
    }

    /// 所有已用块的编号（升序）
    pub fn used(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.total_blocks).filter(move |&i| self.is_used(i))
    }

    fn locate(block_index: BlockId) -> (usize, u8) {
        ((block_index / 8) as usize, (block_index % 8) as u8)
    }
}
