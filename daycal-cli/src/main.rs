mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use daycal_core::Calendar;

#[derive(Parser)]
#[command(name = "daycal")]
#[command(about = "Create, inspect and delete reminders stored one file per day")]
struct Cli {
    /// Show debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new event
    Add(AddArgs),
    /// Show an event and its timing
    Show { id: String },
    /// Delete an event from the day it is stored in
    Delete { id: String },
    /// Mark an event as announced
    Deactivate { id: String },
    /// List every stored day with its events
    Days,
}

#[derive(Args)]
pub struct AddArgs {
    name: String,

    /// Start after this long (e.g. "90m", "2h 30m")
    #[arg(long = "in", value_name = "DURATION", conflicts_with = "at", required_unless_present = "at")]
    starts_in: Option<humantime::Duration>,

    /// Start at this instant (RFC 3339, e.g. "2025-03-20T15:00:00Z")
    #[arg(long)]
    at: Option<chrono::DateTime<chrono::Utc>>,

    /// Announce this long before the start
    #[arg(long, value_name = "DURATION")]
    alert_before: Option<humantime::Duration>,

    /// How long the event lasts
    #[arg(long, value_name = "DURATION")]
    lasts: Option<humantime::Duration>,

    #[arg(short, long)]
    description: Option<String>,

    /// Link shown with the announcement
    #[arg(long)]
    link: Option<String>,

    #[command(flatten)]
    chat: ChatArgs,
}

/// Chat message the event was created from
#[derive(Args)]
pub struct ChatArgs {
    #[arg(long, requires_all = ["channel", "message", "author"])]
    guild: Option<i64>,

    #[arg(long, requires = "guild")]
    channel: Option<i64>,

    #[arg(long, requires = "guild")]
    message: Option<i64>,

    #[arg(long, requires = "guild")]
    author: Option<i64>,

    /// Mention everyone in the channel when announcing
    #[arg(long, requires = "guild")]
    everyone: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let calendar = Calendar::load()?;
    tracing::debug!(
        "Using calendar folder {}",
        calendar.repository().dir().display()
    );

    match cli.command {
        Commands::Add(args) => commands::add::run(&calendar, args),
        Commands::Show { id } => commands::show::run(&calendar, &id),
        Commands::Delete { id } => commands::delete::run(&calendar, &id),
        Commands::Deactivate { id } => commands::deactivate::run(&calendar, &id),
        Commands::Days => commands::days::run(&calendar),
    }
}
