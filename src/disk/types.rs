/// 每个逻辑块（Block）的默认大小：128 字节
/// 文件系统以“块”为最小分配单位。
pub const BLOCK_SIZE: usize = 128;

/// 模拟磁盘默认包含的块数：1024 块，编号 0..1023
pub const DISK_SIZE: usize = 1024;

/// 块编号，指向 BlockStore 中的一个槽位
pub type BlockId = u64;
