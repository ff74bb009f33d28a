//! Local key-value persistence for calendar state.

mod calendar_store;
mod file;
mod memory;

pub use calendar_store::{CALENDAR_ITEMS_KEY, CalendarStore};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AdventResult;

/// String values stored under string keys, in the manner of platform
/// shared preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AdventResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> AdventResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> AdventResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> AdventResult<()> {
        (**self).put(key, value)
    }
}
