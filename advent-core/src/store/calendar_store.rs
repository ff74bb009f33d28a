//! Serialized calendar list under a single fixed key.

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::AdventResult;
use crate::item::{CalendarItem, validate_items};

pub const CALENDAR_ITEMS_KEY: &str = "calendar_items";

pub struct CalendarStore<S> {
    store: S,
}

impl<S: KeyValueStore> CalendarStore<S> {
    pub fn new(store: S) -> Self {
        CalendarStore { store }
    }

    /// Load the persisted list.
    ///
    /// Returns `None` when nothing is stored or when the stored value can't
    /// be read, parsed, or doesn't describe a full calendar. Callers fall back
    /// to the default list in that case.
    pub fn load(&self) -> Option<Vec<CalendarItem>> {
        let content = match self.store.get(CALENDAR_ITEMS_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!(key = CALENDAR_ITEMS_KEY, "no stored calendar");
                return None;
            }
            Err(e) => {
                warn!(key = CALENDAR_ITEMS_KEY, error = %e, "could not read stored calendar");
                return None;
            }
        };

        let items: Vec<CalendarItem> = match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!(key = CALENDAR_ITEMS_KEY, error = %e, "stored calendar is malformed");
                return None;
            }
        };

        if let Err(e) = validate_items(&items) {
            warn!(key = CALENDAR_ITEMS_KEY, error = %e, "stored calendar is incomplete");
            return None;
        }

        debug!(key = CALENDAR_ITEMS_KEY, doors = items.len(), "loaded stored calendar");
        Some(items)
    }

    /// Persist the full list, replacing whatever was stored.
    pub fn save(&self, items: &[CalendarItem]) -> AdventResult<()> {
        let content = serde_json::to_string(items)?;
        self.store.put(CALENDAR_ITEMS_KEY, &content)
    }
}
