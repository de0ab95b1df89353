use anyhow::Result;
use daycal_core::Calendar;
use owo_colors::OwoColorize;

use crate::render::{Render, render_details};

pub fn run(calendar: &Calendar, id: &str) -> Result<()> {
    let Some(found) = calendar.find_event(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    println!("{}", found.day.render());
    for line in render_details(&found.event) {
        println!("{}", line);
    }
    println!();
    println!("{}", found.event.pretty_print().dimmed());

    Ok(())
}
