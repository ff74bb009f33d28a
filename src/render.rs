//! Terminal rendering for the calendar grid.
//!
//! Extension traits add colored output to advent-core types using owo_colors.

use advent_core::eligibility::is_eligible;
use advent_core::{CalendarItem, UiState};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Doors per grid row.
pub const GRID_COLUMNS: usize = 6;

/// Width of one door cell, brackets included.
const CELL_WIDTH: usize = 6;

/// How a door looks on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorLook {
    Open,
    Ready,
    Shut,
}

impl DoorLook {
    pub fn of(item: &CalendarItem, start_date: NaiveDate, today: NaiveDate) -> Self {
        if item.is_unlocked {
            DoorLook::Open
        } else if is_eligible(item.day, start_date, today) {
            DoorLook::Ready
        } else {
            DoorLook::Shut
        }
    }
}

pub trait Render {
    fn render(&self, look: DoorLook) -> String;
}

impl Render for CalendarItem {
    fn render(&self, look: DoorLook) -> String {
        let label = match look {
            DoorLook::Open => "[ ** ]".to_string(),
            _ => format!("[ {:>2} ]", self.day),
        };
        debug_assert_eq!(label.len(), CELL_WIDTH);

        match look {
            DoorLook::Open => label.green().to_string(),
            DoorLook::Ready => label.yellow().bold().to_string(),
            DoorLook::Shut => label.dimmed().to_string(),
        }
    }
}

/// Render the full grid, in stored order, followed by a short summary.
pub fn render_grid(state: &UiState, start_date: NaiveDate, today: NaiveDate) -> String {
    let mut lines: Vec<String> = state
        .items
        .chunks(GRID_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|item| item.render(DoorLook::of(item, start_date, today)))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let open = state.items.iter().filter(|i| i.is_unlocked).count();
    let ready = state
        .items
        .iter()
        .filter(|i| DoorLook::of(i, start_date, today) == DoorLook::Ready)
        .count();

    lines.push(String::new());
    lines.push(format!("{} of {} doors open", open, state.items.len()));
    if ready > 0 {
        lines.push(
            format!("{} {} ready to open", ready, pluralize("door", ready))
                .yellow()
                .to_string(),
        );
    }
    if state.rejected {
        lines.push("Not yet! Be patient.".red().to_string());
    }

    lines.join("\n")
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
