//! `showtime` CLI — find the cinema sessions that fit around your calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Keep the sessions that clash with no calendar event
//! showtime filter --sessions sessions.json --events events.json
//!
//! # Read the provider events from stdin, write the result to a file
//! curl ... | showtime filter -s sessions.json -e - -o free.json
//!
//! # Which range should the calendar be queried for?
//! showtime window -s sessions.json
//!
//! # Print the busy intervals a calendar response reduces to
//! showtime busy -e events.json
//!
//! # Build sessions.json from scraped showings
//! showtime assemble -i showings.json -o sessions.json
//!
//! # Interpret local times in another zone
//! SHOWTIME_TZ=Europe/Warsaw showtime filter -s sessions.json -e events.json
//! ```

mod sources;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use showtime_engine::normalize::format_local_timestamp;
use showtime_engine::{
    assemble_schedule, busy_intervals, find_free_sessions, parse_events_json, QueryWindow, Showing,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::sources::{read_input, EventsFile, SessionsFile};

#[derive(Parser)]
#[command(
    name = "showtime",
    version,
    about = "Filter cinema sessions against calendar busy intervals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone of the cinema's local times
    #[arg(
        long,
        global = true,
        env = "SHOWTIME_TZ",
        default_value = "Europe/Kyiv",
        value_parser = parse_timezone
    )]
    tz: Tz,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep only the sessions that overlap no calendar event
    Filter {
        /// Sessions JSON (`-` for stdin)
        #[arg(short, long)]
        sessions: String,
        /// Calendar provider events JSON (`-` for stdin)
        #[arg(short, long)]
        events: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the busy intervals a calendar response reduces to
    Busy {
        /// Calendar provider events JSON (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        events: String,
    },
    /// Print the calendar query window (timeMin/timeMax) for a schedule
    Window {
        /// Sessions JSON (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        sessions: String,
        /// Reference time as RFC 3339 (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },
    /// Build sessions JSON from scraped showings
    Assemble {
        /// Showings JSON (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let tz = cli.tz;

    match cli.command {
        Commands::Filter {
            sessions,
            events,
            output,
        } => {
            if sessions == "-" && events == "-" {
                anyhow::bail!("Only one of --sessions and --events can read from stdin");
            }
            let sessions = SessionsFile::new(sessions, tz);
            let events = EventsFile::new(events, tz);

            let free = find_free_sessions(&sessions, &events)
                .context("Failed to compute free sessions")?;
            info!(kept = free.session_count(), "free sessions computed");

            let json = free.to_json_pretty(tz)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Busy { events } => {
            let json = read_input(&events)?;
            let events = parse_events_json(&json)
                .context("Failed to parse calendar events")?;
            let busy = busy_intervals(&events, tz).context("Failed to reduce calendar events")?;

            let pairs: Vec<[String; 2]> = busy
                .iter()
                .map(|b| {
                    [
                        format_local_timestamp(b.start(), tz),
                        format_local_timestamp(b.end(), tz),
                    ]
                })
                .collect();
            write_output(None, &serde_json::to_string_pretty(&pairs)?)?;
        }
        Commands::Window { sessions, now } => {
            let now = match now {
                Some(text) => DateTime::parse_from_rfc3339(&text)
                    .with_context(|| format!("Invalid --now timestamp: {}", text))?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };
            let schedule = SessionsFile::new(sessions, tz)
                .load()
                .context("Failed to read sessions")?;

            let window = QueryWindow::for_schedule(&schedule, now, tz)?
                .context("Schedule has no dates after the reference time")?;
            let body = serde_json::json!({
                "timeMin": window.time_min(),
                "timeMax": window.time_max(),
            });
            write_output(None, &serde_json::to_string_pretty(&body)?)?;
        }
        Commands::Assemble { input, output } => {
            let json = read_input(&input)?;
            let showings: Vec<Showing> =
                serde_json::from_str(&json).context("Failed to parse showings JSON")?;
            let schedule =
                assemble_schedule(&showings, tz).context("Failed to assemble schedule")?;
            info!(sessions = schedule.session_count(), "schedule assembled");

            write_output(output.as_deref(), &schedule.to_json_pretty(tz)?)?;
        }
    }

    Ok(())
}

fn parse_timezone(name: &str) -> std::result::Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("unknown IANA timezone '{}'", name))
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_logging(verbose: bool) {
    let default = if verbose { "showtime=debug" } else { "showtime=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
