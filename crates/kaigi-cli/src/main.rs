use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kaigi")]
#[command(about = "kaigi - conference timetable with favorites", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the timetable grouped by time slot
    Timetable(commands::timetable::TimetableArgs),
    /// Manage favorited sessions
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// List conference days
    Days {
        /// Read the timetable from a JSON file instead of the API
        #[arg(long)]
        source: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Add or remove a session from favorites
    Toggle {
        /// Session id
        id: String,
    },
    /// List favorited session ids
    List,
    /// Remove all favorites
    Clear,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::utils::AppContext::load(cli.config)?;

    match cli.command {
        Commands::Timetable(args) => commands::timetable::run(&ctx, args).await?,
        Commands::Favorite { action } => match action {
            FavoriteAction::Toggle { id } => commands::favorite::toggle(&ctx, id).await?,
            FavoriteAction::List => commands::favorite::list(&ctx).await?,
            FavoriteAction::Clear => commands::favorite::clear(&ctx).await?,
        },
        Commands::Days { source } => commands::days::run(&ctx, source).await?,
    }

    Ok(())
}
