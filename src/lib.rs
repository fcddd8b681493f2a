pub mod cache;
pub mod config;
pub mod counter;
pub mod helper;
pub mod memory;
pub mod redis_store;
pub mod store;
pub mod value;

pub use cache::Cache;
pub use counter::CallCounter;
pub use memory::MemoryStore;
pub use store::KvStore;
pub use value::{Decode, Decoded, StoreValue};
