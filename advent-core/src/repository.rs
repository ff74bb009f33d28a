//! Single source of truth for the calendar's doors.
//!
//! The repository publishes immutable snapshots of the door list through a
//! `watch` channel. Every unlock replaces the snapshot wholesale and writes the
//! full list back to the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{AdventError, AdventResult};
use crate::item::{CalendarItem, shuffled};
use crate::store::{CalendarStore, KeyValueStore};

/// Immutable view of the door list at one point in time.
pub type Snapshot = Arc<Vec<CalendarItem>>;

/// Result of asking the repository to open a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    AlreadyUnlocked,
    UnknownDay,
}

pub trait CalendarRepository: Send + Sync {
    /// Subscribe to the door list. The receiver holds the current snapshot
    /// and sees every later change.
    fn items(&self) -> watch::Receiver<Snapshot>;

    /// Date the first door opens.
    fn start_date(&self) -> NaiveDate;

    /// Open the door for `day`, then publish and persist the new list.
    fn unlock_item(&self, day: u8) -> AdventResult<UnlockOutcome>;
}

/// Repository backed by a local key-value store.
pub struct LocalCalendarRepository<S> {
    store: CalendarStore<S>,
    start_date: NaiveDate,
    sender: watch::Sender<Snapshot>,
    loaded: AtomicBool,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> LocalCalendarRepository<S> {
    /// Build a repository over `store`.
    ///
    /// `defaults` is the list used when nothing valid is persisted. It is
    /// shuffled once here and that order is what gets persisted.
    pub fn new(store: CalendarStore<S>, start_date: NaiveDate, defaults: &[CalendarItem]) -> Self {
        let (sender, _) = watch::channel(Arc::new(shuffled(defaults)));

        LocalCalendarRepository {
            store,
            start_date,
            sender,
            loaded: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the in-memory default with persisted state, once.
    fn ensure_loaded(&self) {
        if self.loaded.load(Ordering::Acquire) {
            return;
        }

        let Ok(_guard) = self.write_lock.lock() else {
            warn!("calendar write lock poisoned; keeping in-memory list");
            return;
        };

        // Another caller may have loaded while we waited for the lock
        if self.loaded.load(Ordering::Acquire) {
            return;
        }

        match self.store.load() {
            Some(items) => {
                info!(
                    unlocked = items.iter().filter(|i| i.is_unlocked).count(),
                    "restored calendar from store"
                );
                self.sender.send_replace(Arc::new(items));
            }
            None => {
                // Persist the fresh shuffle so later launches keep this order
                let current = self.sender.borrow().clone();
                info!("no usable stored calendar; starting a new one");
                if let Err(e) = self.store.save(&current) {
                    warn!(error = %e, "could not persist new calendar");
                }
            }
        }

        self.loaded.store(true, Ordering::Release);
    }
}

impl<S: KeyValueStore> CalendarRepository for LocalCalendarRepository<S> {
    fn items(&self) -> watch::Receiver<Snapshot> {
        self.ensure_loaded();
        self.sender.subscribe()
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn unlock_item(&self, day: u8) -> AdventResult<UnlockOutcome> {
        self.ensure_loaded();

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AdventError::Storage("calendar write lock poisoned".into()))?;

        let current = self.sender.borrow().clone();

        let Some(target) = current.iter().find(|i| i.day == day) else {
            debug!(day, "unlock requested for unknown day");
            return Ok(UnlockOutcome::UnknownDay);
        };
        if target.is_unlocked {
            debug!(day, "door already open");
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }

        let updated: Vec<CalendarItem> = current
            .iter()
            .map(|item| {
                if item.day == day {
                    item.unlocked()
                } else {
                    item.clone()
                }
            })
            .collect();

        self.sender.send_replace(Arc::new(updated.clone()));
        info!(day, "door unlocked");

        self.store.save(&updated)?;
        Ok(UnlockOutcome::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{default_items, shuffled, validate_items};
    use crate::store::{CALENDAR_ITEMS_KEY, MemoryStore};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn repository(store: Arc<MemoryStore>) -> LocalCalendarRepository<Arc<MemoryStore>> {
        LocalCalendarRepository::new(CalendarStore::new(store), start(), &default_items())
    }

    fn by_day(items: &[CalendarItem], day: u8) -> &CalendarItem {
        items.iter().find(|i| i.day == day).unwrap()
    }

    #[test]
    fn first_subscription_publishes_a_full_locked_calendar() {
        let repo = repository(Arc::new(MemoryStore::new()));
        let items = repo.items().borrow().clone();

        assert!(validate_items(&items).is_ok());
        assert!(items.iter().all(|i| !i.is_unlocked));
        assert_eq!(repo.start_date(), start());
    }

    #[test]
    fn new_calendar_order_survives_a_restart() {
        let store = Arc::new(MemoryStore::new());

        let first = repository(store.clone()).items().borrow().clone();
        assert!(store.get(CALENDAR_ITEMS_KEY).unwrap().is_some());

        let second = repository(store).items().borrow().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn unlock_changes_exactly_one_door() {
        let repo = repository(Arc::new(MemoryStore::new()));
        let before = repo.items().borrow().clone();

        assert_eq!(repo.unlock_item(3).unwrap(), UnlockOutcome::Unlocked);

        let after = repo.items().borrow().clone();
        assert_eq!(after.iter().filter(|i| i.day == 3).count(), 1);
        assert!(by_day(&after, 3).is_unlocked);
        for (old, new) in before.iter().zip(after.iter()) {
            if old.day != 3 {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn unlock_is_idempotent() {
        let repo = repository(Arc::new(MemoryStore::new()));

        repo.unlock_item(7).unwrap();
        let once = repo.items().borrow().clone();

        assert_eq!(repo.unlock_item(7).unwrap(), UnlockOutcome::AlreadyUnlocked);
        let twice = repo.items().borrow().clone();

        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_day_is_a_no_op() {
        let repo = repository(Arc::new(MemoryStore::new()));
        let before = repo.items().borrow().clone();

        assert_eq!(repo.unlock_item(25).unwrap(), UnlockOutcome::UnknownDay);
        assert_eq!(repo.unlock_item(0).unwrap(), UnlockOutcome::UnknownDay);
        assert_eq!(*repo.items().borrow().clone(), *before);
    }

    #[test]
    fn unlock_persists_the_full_list() {
        let store = Arc::new(MemoryStore::new());
        let repo = repository(store.clone());
        repo.unlock_item(12).unwrap();
        let published = repo.items().borrow().clone();

        let restored = repository(store).items().borrow().clone();
        assert_eq!(restored, published);
        assert!(by_day(&restored, 12).is_unlocked);
    }

    #[test]
    fn subscribers_see_each_unlock() {
        let repo = repository(Arc::new(MemoryStore::new()));
        let mut rx = repo.items();
        rx.mark_unchanged();

        repo.unlock_item(1).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(by_day(&rx.borrow_and_update(), 1).is_unlocked);

        repo.unlock_item(1).unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn concurrent_first_calls_keep_stored_unlocks() {
        let store = Arc::new(MemoryStore::new());
        let mut stored = shuffled(&default_items());
        for item in stored.iter_mut().filter(|i| i.day <= 2) {
            *item = item.unlocked();
        }
        CalendarStore::new(store.clone()).save(&stored).unwrap();

        let repo = repository(store.clone());
        std::thread::scope(|scope| {
            scope.spawn(|| repo.unlock_item(3).unwrap());
            scope.spawn(|| repo.unlock_item(4).unwrap());
            scope.spawn(|| repo.items());
        });

        let restored = repository(store).items().borrow().clone();
        let mut open: Vec<u8> = restored
            .iter()
            .filter(|i| i.is_unlocked)
            .map(|i| i.day)
            .collect();
        open.sort();
        assert_eq!(open, vec![1, 2, 3, 4]);

        let order: Vec<u8> = restored.iter().map(|i| i.day).collect();
        let stored_order: Vec<u8> = stored.iter().map(|i| i.day).collect();
        assert_eq!(order, stored_order);
    }

    #[test]
    fn corrupt_store_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.put(CALENDAR_ITEMS_KEY, "[{\"day\": \"one\"}]").unwrap();

        let items = repository(store.clone()).items().borrow().clone();
        assert!(validate_items(&items).is_ok());
        assert!(items.iter().all(|i| !i.is_unlocked));

        // The fresh calendar replaces the corrupt value
        let stored = store.get(CALENDAR_ITEMS_KEY).unwrap().unwrap();
        let parsed: Vec<CalendarItem> = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, *items);
    }
}
