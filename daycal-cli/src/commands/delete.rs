use anyhow::Result;
use daycal_core::Calendar;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(calendar: &Calendar, id: &str) -> Result<()> {
    match calendar.delete_event(id)? {
        Some(deleted) => {
            println!(
                "{} {} {}",
                "Deleted".red(),
                deleted.event.render(),
                format!("from {}", deleted.day.date()).dimmed()
            );
            Ok(())
        }
        None => anyhow::bail!("Event '{}' not found", id),
    }
}
