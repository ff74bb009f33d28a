pub mod open;
pub mod show;
pub mod view;

use advent_core::UiState;
use anyhow::{Result, bail};

use crate::CalendarModel;

/// Wait for the first mirrored snapshot of the calendar.
pub async fn current_state(model: &CalendarModel) -> Result<UiState> {
    let mut state = model.state();
    let ready = state.wait_for(|s| !s.items.is_empty()).await;

    match ready {
        Ok(ui) => Ok(ui.clone()),
        Err(_) => bail!("Calendar state is no longer available"),
    }
}
