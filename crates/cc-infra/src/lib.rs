pub mod fs;
pub mod storage;
pub mod time;

pub use fs::DirsAppDirsAdapter;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
