mod cli;

use crate::cli::app::App;
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use filmshelf::{ClientConfig, HttpMovieApi, Synchronizer};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "filmshelf")]
#[command(about = "Terminal client for a remote movie collection")]
struct Cli {
    /// Collection endpoint (overrides FILMSHELF_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides FILMSHELF_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Where the interactive UI writes its log
    #[arg(long, global = true, default_value = "filmshelf.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive UI (the default)
    Tui,
    /// Print the collection as a table
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the collection as an HTML listing
    Export {
        #[arg(long)]
        filter: Option<String>,
    },
    Add {
        title: String,
        genre: String,
        year: String,
    },
    Edit {
        id: String,
        title: String,
        genre: String,
        year: String,
    },
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    match &command {
        Command::Tui => init_tracing(Some(&cli.log_file))?,
        _ => init_tracing(None)?,
    }

    let mut config = ClientConfig::from_env().context("failed to load client configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.request_timeout(Duration::from_secs(secs));
    }

    let api = HttpMovieApi::new(&config).context("failed to build HTTP client")?;
    tracing::info!(base_url = %api.base_url(), "filmshelf starting");
    let mut sync = Synchronizer::new(Arc::new(api));

    let mut stdout = io::stdout();
    match command {
        Command::Tui => {
            let mut app = App::new(sync);
            app.run().await.map_err(|err| anyhow!("terminal UI failed: {err}"))?;
        }
        Command::List { filter } => {
            cli::commands::list(&mut sync, filter.as_deref(), &mut stdout).await?
        }
        Command::Export { filter } => {
            cli::commands::export(&mut sync, filter.as_deref(), &mut stdout).await?
        }
        Command::Add { title, genre, year } => {
            cli::commands::add(&mut sync, &title, &genre, &year, &mut stdout).await?
        }
        Command::Edit {
            id,
            title,
            genre,
            year,
        } => cli::commands::edit(&mut sync, &id, &title, &genre, &year, &mut stdout).await?,
        Command::Remove { id, yes } => {
            let mut stdin = io::stdin().lock();
            cli::commands::remove(&mut sync, &id, yes, &mut stdin, &mut stdout).await?
        }
    }

    Ok(())
}

/// Log to `log_file` when given (the UI owns the terminal), otherwise stderr.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("filmshelf=info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
    Ok(())
}
