use advent_core::{DoorOutcome, UnlockOutcome};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::current_state;
use crate::CalendarModel;
use crate::render::render_grid;

pub async fn run(model: &CalendarModel, day: u8) -> Result<()> {
    match model.on_door_clicked(day).await? {
        DoorOutcome::Opened(UnlockOutcome::Unlocked) => {
            println!("{}", format!("Door {day} is open!").green());
            println!("{}", format!("See the picture with `advent view {day}`").dimmed());
        }
        DoorOutcome::Opened(UnlockOutcome::AlreadyUnlocked) => {
            println!("Door {day} was already open.");
        }
        DoorOutcome::Opened(UnlockOutcome::UnknownDay) => {
            anyhow::bail!("There is no door {day}. Pick a day from 1 to 24.");
        }
        DoorOutcome::Rejected { opens_on } => {
            let state = current_state(model).await?;
            println!("{}", render_grid(&state, model.start_date(), model.today()));
            println!(
                "\n{}",
                format!("Door {day} opens on {}", opens_on.format("%B %-d, %Y")).dimmed()
            );

            // Keep the cue up until the view-model clears it
            let mut state = model.state();
            let _ = state.wait_for(|s| !s.rejected).await;
        }
    }

    Ok(())
}
