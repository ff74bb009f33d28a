//! Calendar doors and the default 24-door list.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{AdventError, AdventResult};

/// Number of doors in the calendar.
pub const DOOR_COUNT: u8 = 24;

/// One door of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarItem {
    pub day: u8,
    /// Opaque handle to the day's artwork, resolved by the front-end.
    pub image_reference: String,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl CalendarItem {
    pub fn new(day: u8, image_reference: impl Into<String>) -> Self {
        CalendarItem {
            day,
            image_reference: image_reference.into(),
            is_unlocked: false,
        }
    }

    /// Copy of this item with the door opened.
    pub fn unlocked(&self) -> Self {
        CalendarItem {
            is_unlocked: true,
            ..self.clone()
        }
    }
}

/// The hard-coded 24 doors in day order, all locked.
pub fn default_items() -> Vec<CalendarItem> {
    (1..=DOOR_COUNT)
        .map(|day| CalendarItem::new(day, format!("day{day}.png")))
        .collect()
}

/// Shuffle a list of doors into the order they will be shown in.
pub fn shuffled(items: &[CalendarItem]) -> Vec<CalendarItem> {
    let mut items = items.to_vec();
    items.shuffle(&mut rand::thread_rng());
    items
}

/// Check that a list holds exactly one door for every day 1..=24.
pub fn validate_items(items: &[CalendarItem]) -> AdventResult<()> {
    if items.len() != DOOR_COUNT as usize {
        return Err(AdventError::InvalidItems(format!(
            "expected {} doors, found {}",
            DOOR_COUNT,
            items.len()
        )));
    }

    let mut seen = HashSet::new();
    for item in items {
        if !(1..=DOOR_COUNT).contains(&item.day) {
            return Err(AdventError::InvalidItems(format!(
                "day {} is out of range",
                item.day
            )));
        }
        if !seen.insert(item.day) {
            return Err(AdventError::InvalidItems(format!(
                "day {} appears more than once",
                item.day
            )));
        }
    }

    Ok(())
}
