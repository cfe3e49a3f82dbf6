mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use breakroom_core::impls::{
    ConsoleNotifier, FixedHolidays, InMemoryHistoryStore, JsonDirHistoryStore, StaticDirectory,
    TracingEventSink,
};
use breakroom_core::ports::{HistoryStore, SystemClock};
use breakroom_core::{RunOutcome, SchedulerBuilder};

use crate::config::{BreakroomConfig, DEFAULT_CONFIG_PATH, create_default_config, load_config};

#[derive(Parser)]
#[command(name = "breakroom", version, about = "Pair up colleagues for coffee breaks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select participants, pair them, announce and record the round
    Run(RunArgs),
    /// Create a default config file
    Init {
        /// Where to write the config (default: ./breakroom.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct RunArgs {
    /// Path to config file (default: ./breakroom.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed random seed (overrides the config value)
    #[arg(long)]
    seed: Option<u64>,

    /// Plan and announce, but do not write the round to history
    #[arg(long)]
    dry_run: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("breakroom=info,breakroom_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { config } => {
            let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
            create_default_config(&path)?;
            println!("Created config at {}", path.display());
            Ok(())
        }
        Command::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let config_path = args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;

    let mut scheduler_config = config.scheduler.clone();
    if args.seed.is_some() {
        scheduler_config.seed = args.seed;
    }

    let history_dir = config.history_dir_from(&config_path);
    let file_store = JsonDirHistoryStore::new(&history_dir);
    tracing::debug!(history_dir = %history_dir.display(), dry_run = args.dry_run, "history store");

    let builder = SchedulerBuilder::new(scheduler_config)
        .directory(directory_from(&config))
        .notifier(ConsoleNotifier)
        .calendar(FixedHolidays::new(config.holidays.iter().copied()).skipping_weekends(config.skip_weekends))
        .clock(SystemClock)
        .events(TracingEventSink);

    let builder = if args.dry_run {
        // 書き込み先をメモリに差し替え、読めない履歴は空として扱う（本番と同じ）
        let records = match file_store.read_all().await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "history unavailable, dry run starts from empty history");
                Vec::new()
            }
        };
        builder.history(InMemoryHistoryStore::with_records(records))
    } else {
        builder.history(file_store)
    };

    let scheduler = builder.build()?;
    let outcome = scheduler.run_once().await.context("coffee break round failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn directory_from(config: &BreakroomConfig) -> StaticDirectory<SystemClock> {
    StaticDirectory::new(config.participants.clone(), SystemClock).with_policy(config.absence_policy())
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Skipped { date, reason } => {
            println!("{date}: no round ({reason:?})");
        }
        RunOutcome::Completed(report) => {
            println!("{}: {} pair(s) in {}", report.round.date, report.round.len(), report.round.id);
            for pair in report.round.pairs() {
                println!("  {} + {}", pair.first(), pair.second());
            }
            if !report.undelivered.is_empty() {
                println!("Not announced (not recorded):");
                for pair in &report.undelivered {
                    println!("  {} + {}", pair.first(), pair.second());
                }
            }
        }
    }
}
