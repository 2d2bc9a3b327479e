use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use habit_core::{Config, HabitStore, Tracker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LONG_ABOUT: &str = "\
habit is a tool that helps users track and establish a new habit, by reporting
their current streak.

Run `habit <HABIT>` each time you do a habit. Run `habit` with no arguments to
see a summary of every habit you are tracking.

The default store file is 'habit.store' in the current directory. It is created
automatically the first time a habit is recorded. The location can be changed
with --store or with `store_path` in ~/.config/habit/config.toml.";

#[derive(Parser)]
#[command(name = "habit", version, about = "Track daily habit streaks", long_about = LONG_ABOUT)]
struct Cli {
    /// Habit to record; omit to print a summary
    habit: Option<String>,

    /// Store file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,
}

/// Initialize tracing on stderr so stdout only carries the report
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = match cli.store {
        Some(path) => path,
        None => Config::load()?.store_path,
    };
    tracing::debug!(path = %store_path.display(), "using habit store");

    let store = Arc::new(HabitStore::open(&store_path)?);
    let mut tracker = Tracker::builder()
        .store(store)
        .output(std::io::stdout())
        .build()?;

    match cli.habit {
        Some(name) => {
            tracker.record(&name)?;
        }
        None => {
            tracker.summarize()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
