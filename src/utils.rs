use chrono::{DateTime, Local};

pub fn now() -> DateTime<Local> {
    Local::now()
}

/// 存放 `len` 字节需要的块数：ceil(len / block_size)
pub fn blocks_needed(len: usize, block_size: usize) -> usize {
    (len + block_size - 1) / block_size
}
