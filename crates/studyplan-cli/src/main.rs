use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::parse_date_arg;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Exam-driven study time planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule from a plan file and print it
    Plan {
        #[command(flatten)]
        args: commands::plan::PlanArgs,
        /// Day used for the "today" block (default: today)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the study goal for a single day
    Today {
        #[command(flatten)]
        args: commands::plan::PlanArgs,
        /// Day to show (default: today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive planning session (nothing is saved)
    Shell,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

/// Log to stderr so stdout stays clean for tables and JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { args, today, json } => commands::plan::run_plan(args, today, json),
        Commands::Today { args, date, json } => commands::plan::run_today(args, date, json),
        Commands::Shell => commands::shell::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyplan", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
