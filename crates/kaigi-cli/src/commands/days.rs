use anyhow::{Context, Result};
use std::path::PathBuf;

use super::utils::AppContext;

pub async fn run(ctx: &AppContext, source: Option<PathBuf>) -> Result<()> {
    let timetable = ctx
        .session_source(source)?
        .fetch_snapshot()
        .await
        .context("Failed to fetch timetable")?;

    for (index, day) in timetable.days().iter().enumerate() {
        let count = timetable
            .sessions()
            .iter()
            .filter(|session| session.day() == *day)
            .count();
        println!(
            "Day {}: {} ({} sessions)",
            index + 1,
            day.format("%Y-%m-%d (%a)"),
            count
        );
    }
    Ok(())
}
