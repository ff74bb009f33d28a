use anyhow::{Context, Result};

use super::current_state;
use crate::CalendarModel;
use crate::render::render_grid;

pub async fn run(model: &CalendarModel, json: bool) -> Result<()> {
    let state = current_state(model).await?;

    if json {
        let out = serde_json::to_string_pretty(state.items.as_slice())
            .context("Failed to serialize calendar")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", render_grid(&state, model.start_date(), model.today()));
    Ok(())
}
