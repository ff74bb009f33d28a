//! Core of the advent calendar.
//!
//! This crate holds everything below the presentation layer:
//! - `item` for the 24 doors and their default list
//! - `eligibility` for the date rule that decides which doors may open
//! - `store` and `repository` for persisted, observable door state
//! - `view_model` for click handling and the transient rejection cue

pub mod clock;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod item;
pub mod repository;
pub mod store;
pub mod view_model;

pub use crate::clock::{Clock, FixedClock, LocalClock};
pub use crate::config::AdventConfig;
pub use crate::error::{AdventError, AdventResult};
pub use crate::item::{CalendarItem, DOOR_COUNT, default_items};
pub use crate::repository::{CalendarRepository, LocalCalendarRepository, Snapshot, UnlockOutcome};
pub use crate::view_model::{CalendarViewModel, DoorOutcome, UiState};
