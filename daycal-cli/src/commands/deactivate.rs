use anyhow::Result;
use daycal_core::Calendar;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(calendar: &Calendar, id: &str) -> Result<()> {
    let Some(mut found) = calendar.find_event(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    if found.event.is_inactive() {
        println!("{}", "Already announced".dimmed());
        return Ok(());
    }

    found.event.set_active(false);
    let saved = calendar.save_event(&found.event)?;

    println!("{} {}", "Announced".green(), saved.event.render());
    Ok(())
}
