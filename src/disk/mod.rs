pub mod bitmap;
pub mod block_store;
pub mod types;

pub use block_store::BlockStore;
pub use types::{BlockId, BLOCK_SIZE, DISK_SIZE};
