use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use daycal_core::{Calendar, ChatPayload, DefaultPayload, Event};
use owo_colors::OwoColorize;

use crate::AddArgs;
use crate::render::render_details;

pub fn run(calendar: &Calendar, args: AddArgs) -> Result<()> {
    let start = match (args.at, args.starts_in) {
        (Some(at), _) => at,
        (None, Some(starts_in)) => Utc::now() + to_delta(starts_in)?,
        (None, None) => anyhow::bail!("Either --in or --at is required"),
    };
    let start_ms = start.timestamp_millis();

    let mut event = Event::new();
    event.set_name(args.name).set_start(start_ms);

    if let Some(lasts) = args.lasts {
        event.set_end(start_ms + to_delta(lasts)?.num_milliseconds());
    }
    if let Some(before) = args.alert_before {
        event.set_alert(start_ms - to_delta(before)?.num_milliseconds());
    }
    if let Some(description) = args.description {
        event.set_description(description);
    }

    match (args.chat.guild, args.chat.channel, args.chat.message, args.chat.author) {
        (Some(guild), Some(channel), Some(message), Some(author)) => {
            let mut chat = ChatPayload::new(guild, channel, message, author)
                .with_mention_everyone(args.chat.everyone);
            if let Some(link) = args.link {
                chat = chat.with_link(link);
            }
            event.set_payload(chat);
        }
        _ => {
            if let Some(link) = args.link {
                event.set_payload(DefaultPayload::with_link(link));
            }
        }
    }

    let saved = calendar.save_event(&event)?;

    println!("{} {}", "Saved to".green(), saved.day.date().bold());
    for line in render_details(&saved.event) {
        println!("{}", line);
    }

    Ok(())
}

fn to_delta(duration: humantime::Duration) -> Result<TimeDelta> {
    TimeDelta::from_std(duration.into()).context("Duration is too long")
}
