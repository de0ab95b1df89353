use anyhow::Result;
use daycal_core::{Calendar, DayListing};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(calendar: &Calendar) -> Result<()> {
    let days = match calendar.days() {
        DayListing::Days(days) => days,
        DayListing::Empty => {
            println!("{}", "No events found".dimmed());
            return Ok(());
        }
        DayListing::Unavailable => {
            println!(
                "{} {}",
                "No calendar folder at".dimmed(),
                calendar.repository().dir().display()
            );
            return Ok(());
        }
    };

    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", day.render());
        for event in day.events() {
            println!("  {}", event.render());
        }
    }

    Ok(())
}
