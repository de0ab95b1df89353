//! Terminal rendering for daycal-core types.

use chrono::{DateTime, TimeDelta, Utc};
use daycal_core::{ChatPayload, DayBucket, DefaultPayload, Event, format_duration};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let name = self.name().unwrap_or("(untitled)");
        let name = if self.is_active() {
            name.bold().to_string()
        } else {
            name.dimmed().to_string()
        };

        let time = self
            .announcement_time()
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());

        format!("{} {} {}", time, name, self.id().dimmed())
    }
}

impl Render for DayBucket {
    fn render(&self) -> String {
        let count = self.events().len();
        format!(
            "{} {}",
            self.date().format("%a %b %-d %Y").bold(),
            format!("({} {})", count, pluralize("event", count)).dimmed()
        )
    }
}

/// Detailed view of one event: timing, relative times and payload.
pub fn render_details(event: &Event) -> Vec<String> {
    let mut lines = vec![event.render()];

    if let Some(description) = event.description() {
        lines.push(format!("   {}", description));
    }

    let fields = [
        ("alert", event.alert()),
        ("start", event.start()),
        ("end", event.end()),
    ];
    for (label, millis) in fields {
        if let Some(millis) = millis {
            lines.push(format!("   {:<6} {}", label.dimmed(), format_instant(millis)));
        }
    }

    if let Some(until) = event.time_until() {
        lines.push(format!("   {}", relative("announced", until)));
    }
    if let Some(duration) = event.duration().filter(|d| !d.is_zero()) {
        lines.push(format!("   lasts {}", format_duration(duration, Some('`'))));
    }

    if let Some(payload) = event.payload() {
        if let Some(chat) = payload.downcast_ref::<ChatPayload>() {
            lines.push(format!(
                "   {} guild {} channel {} message {} author {}{}",
                "chat".dimmed(),
                chat.guild_id,
                chat.channel_id,
                chat.origin_message_id,
                chat.author_id,
                if chat.mention_everyone { " @everyone" } else { "" }
            ));
            if let Some(link) = &chat.provided_link {
                lines.push(format!("   {} {}", "link".dimmed(), link.underline()));
            }
        } else if let Some(link) = payload
            .downcast_ref::<DefaultPayload>()
            .and_then(|p| p.provided_link.as_ref())
        {
            lines.push(format!("   {} {}", "link".dimmed(), link.underline()));
        } else {
            lines.push(format!("   {} {}", "data".dimmed(), payload.tag()));
        }
    }

    lines
}

/// "announced in 5 Minutes" / "announced 2 Hours ago"
fn relative(verb: &str, delta: TimeDelta) -> String {
    let span = format_duration(delta, None);
    if delta < TimeDelta::zero() {
        format!("{} {} ago", verb, span).yellow().to_string()
    } else {
        format!("{} in {}", verb, span).green().to_string()
    }
}

fn format_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn format_instant(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| millis.to_string())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
