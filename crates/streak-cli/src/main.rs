mod clock;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;
use streak_core::reminder::ReminderSlot;
use streak_core::{Tracker, TrackerStore};

#[derive(Parser)]
#[command(
    name = "streak",
    about = "Daily cleaning tracker: mark days done, watch the streak, get reminded",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .streak/ (default: auto-detect upward from cwd)
    #[arg(long, global = true, env = "STREAK_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Pretend today is this date (YYYY-MM-DD, America/New_York calendar)
    #[arg(long, global = true, env = "STREAK_TODAY", hide = true)]
    today: Option<String>,

    /// Pretend the current hour is this (0-23, America/New_York)
    #[arg(long, global = true, env = "STREAK_HOUR", hide = true)]
    hour: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .streak/ with a default config and an empty tracker record
    Init,

    /// Show the current streak and progress toward the goal
    Stats,

    /// Print the raw tracker record
    Show,

    /// Mark a day as done
    MarkDone {
        /// Date to mark (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Who did the cleaning
        #[arg(long = "by", default_value = "Someone")]
        actor: String,
    },

    /// Handle a press of a reminder's "Done!" button
    Press {
        /// Button custom id, e.g. cleaning_done_2024-05-02
        button_id: String,
        /// Who pressed the button
        #[arg(long = "by", default_value = "Someone")]
        actor: String,
    },

    /// Start a fresh cycle (clears all progress)
    Reset,

    /// Cancel the current cycle (clears all progress)
    Cancel,

    /// Pause daily reminders
    Pause,

    /// Resume daily reminders
    Resume,

    /// Report whether today has been marked done
    Today,

    /// Show the reminder a scheduled check-in would post, or why it would not
    Remind {
        /// daily | follow-up (default: whichever is scheduled for the current hour)
        slot: Option<ReminderSlot>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = root::resolve_root(cli.root.as_deref());
    let clock = clock::CliClock::from_overrides(cli.today.as_deref(), cli.hour)?;
    let tracker = Tracker::new(TrackerStore::new(&root), clock);
    let json = cli.json;

    match cli.command {
        Commands::Init => cmd::init::run(&root, &tracker),
        Commands::Stats => cmd::stats::run(&root, &tracker, json),
        Commands::Show => cmd::stats::show(&tracker, json),
        Commands::MarkDone { date, actor } => {
            cmd::mark::run(&tracker, date.as_deref(), &actor, json)
        }
        Commands::Press { button_id, actor } => cmd::mark::press(&tracker, &button_id, &actor, json),
        Commands::Reset => cmd::cycle::reset(&root, &tracker, json),
        Commands::Cancel => cmd::cycle::cancel(&tracker, json),
        Commands::Pause => cmd::cycle::pause(&tracker, json),
        Commands::Resume => cmd::cycle::resume(&tracker, json),
        Commands::Today => cmd::stats::today(&tracker, json),
        Commands::Remind { slot } => cmd::remind::run(&root, &tracker, slot, json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, json),
    }
}
