pub mod kv;
pub mod notify;
pub mod persist;
pub mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use notify::Notification;
pub use persist::{Persistence, STORAGE_KEY};
pub use store::TodoStore;
