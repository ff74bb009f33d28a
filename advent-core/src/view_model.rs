//! UI-facing state and door click handling.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::eligibility::{is_eligible, opens_on};
use crate::error::{AdventError, AdventResult};
use crate::item::DOOR_COUNT;
use crate::repository::{CalendarRepository, Snapshot, UnlockOutcome};

/// How long the rejection cue stays up after an early click.
pub const DEFAULT_REJECTION_DELAY: Duration = Duration::from_secs(3);

/// Everything a front-end needs to draw the calendar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub items: Snapshot,
    /// Set after a click on a door that can't open yet; clears itself.
    pub rejected: bool,
}

/// What happened to a door click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorOutcome {
    Opened(UnlockOutcome),
    Rejected { opens_on: NaiveDate },
}

pub struct CalendarViewModel<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    rejection_delay: Duration,
    state: Arc<watch::Sender<UiState>>,
    mirror: JoinHandle<()>,
}

impl<R: CalendarRepository + 'static> CalendarViewModel<R> {
    /// Subscribe to `repository` and start mirroring its list.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, rejection_delay: Duration) -> Self {
        let (state, _) = watch::channel(UiState::default());
        let state = Arc::new(state);

        let source = Arc::clone(&repository);
        let mirror_state = Arc::clone(&state);
        let mirror = tokio::spawn(async move {
            // The first subscription may read the store
            let mut items = match tokio::task::spawn_blocking(move || source.items()).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "could not subscribe to calendar");
                    return;
                }
            };

            loop {
                let snapshot = items.borrow_and_update().clone();
                debug!(doors = snapshot.len(), "mirroring calendar update");
                mirror_state.send_modify(|s| s.items = snapshot);

                if items.changed().await.is_err() {
                    break;
                }
            }
        });

        CalendarViewModel {
            repository,
            clock,
            rejection_delay,
            state,
            mirror,
        }
    }

    pub fn state(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.repository.start_date()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Handle a click on the door for `day`.
    ///
    /// Eligible doors are unlocked on the blocking pool. Early clicks raise
    /// the rejection flag, which a timer lowers again after the delay.
    /// Days outside the calendar are ignored.
    pub async fn on_door_clicked(&self, day: u8) -> AdventResult<DoorOutcome> {
        if !(1..=DOOR_COUNT).contains(&day) {
            debug!(day, "click on a door that doesn't exist");
            return Ok(DoorOutcome::Opened(UnlockOutcome::UnknownDay));
        }

        let start_date = self.repository.start_date();
        let today = self.clock.today();

        if !is_eligible(day, start_date, today) {
            self.reject();
            let opens_on = opens_on(day, start_date);
            info!(day, %today, %opens_on, "door is not ready yet");
            return Ok(DoorOutcome::Rejected { opens_on });
        }

        let repository = Arc::clone(&self.repository);
        let outcome = tokio::task::spawn_blocking(move || repository.unlock_item(day))
            .await
            .map_err(|e| AdventError::Storage(format!("unlock task failed: {e}")))??;

        Ok(DoorOutcome::Opened(outcome))
    }

    fn reject(&self) {
        self.state.send_modify(|s| s.rejected = true);

        let state = Arc::clone(&self.state);
        let delay = self.rejection_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_modify(|s| s.rejected = false);
        });
    }
}

impl<R> Drop for CalendarViewModel<R> {
    fn drop(&mut self) {
        self.mirror.abort();
    }
}
