use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "habit", version, about = "Habit tracker CLI")]
struct Cli {
    /// Data directory (default: ~/.config/habit)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Show the weekly grid
    Week {
        /// Weeks relative to the current one (-1 = last week)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let ctx = match commands::Context::open(cli.data_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    ctx.init_logging();

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(&ctx, action).await,
        Commands::Week { offset, json } => commands::week::run(&ctx, offset, json),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
