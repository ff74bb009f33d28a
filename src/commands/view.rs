use advent_core::AdventConfig;
use anyhow::{Context, Result, bail};

use super::current_state;
use crate::CalendarModel;

pub async fn run(model: &CalendarModel, config: &AdventConfig, day: u8) -> Result<()> {
    let state = current_state(model).await?;

    let Some(item) = state.items.iter().find(|i| i.day == day) else {
        bail!("There is no door {day}. Pick a day from 1 to 24.");
    };

    if !item.is_unlocked {
        bail!("Door {day} is still closed. Open it first with `advent open {day}`.");
    }

    let image = config.image_path().join(&item.image_reference);
    if !image.exists() {
        bail!("Picture for door {day} not found at {}", image.display());
    }

    println!("Opening {}", image.display());
    open::that(&image).with_context(|| format!("Failed to open {}", image.display()))?;

    Ok(())
}
