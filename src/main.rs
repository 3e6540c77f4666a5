//! Browse repositories hosted on a Gitiles server from the terminal.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

mod app_config;
mod commands;
mod term;
mod trc;

use gitiles::{ClientBuilder, TreeAddr};

use crate::app_config::Config;
use crate::commands::CommandError;
use crate::trc::Trc;

#[derive(Parser)]
#[command(version, about = "Browse Gitiles-hosted repositories from the terminal.")]
struct Args {
    #[arg(
        short,
        long,
        value_parser,
        help = "Optional path to a gitiles-browse config TOML."
    )]
    config_path: Option<PathBuf>,

    /// Base URL of the Gitiles service. Overrides the configuration file.
    #[arg(long, env = "GITILES_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RepoArgs {
    /// Repository name, e.g. `platform/build`.
    repo: String,

    /// Branch or ref to read. Defaults to the configured default branch.
    #[arg(short, long)]
    branch: Option<String>,
}

impl RepoArgs {
    fn addr(self, config: &Config, path: Option<String>) -> TreeAddr {
        TreeAddr::new(
            self.repo,
            self.branch.unwrap_or_else(|| config.default_branch.clone()),
            path.unwrap_or_default(),
        )
    }
}

#[derive(Subcommand)]
enum Command {
    /// List a directory.
    Ls {
        #[command(flatten)]
        repo: RepoArgs,
        /// Directory to list. Defaults to the root.
        path: Option<String>,
    },

    /// Print a file.
    Cat {
        #[command(flatten)]
        repo: RepoArgs,
        path: String,
    },

    /// Show one page of the commit log.
    Log {
        #[command(flatten)]
        repo: RepoArgs,
        /// Limit the log to commits touching this path.
        path: Option<String>,
        /// Resume from the `next` cursor printed by a previous page.
        #[arg(long)]
        start: Option<String>,
    },

    /// Show which commit last touched each line of a file.
    Blame {
        #[command(flatten)]
        repo: RepoArgs,
        path: String,
    },

    /// List the repositories hosted by the service.
    Projects,

    /// Interactively walk a repository. Type an entry name to open it, `q` to quit.
    Browse {
        #[command(flatten)]
        repo: RepoArgs,
        /// Directory to start in. Defaults to the root.
        path: Option<String>,
    },

    /// Print the effective configuration.
    Config,
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    // Errors use eprintln since tracing isn't initialized yet.
    let mut config = Config::load_or_default(args.config_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
        if let Err(error_messages) = config.validate() {
            eprintln!("Configuration is invalid.");
            for msg in &error_messages {
                eprintln!(" - {msg}");
            }
            std::process::exit(1);
        }
    }

    if let Err(e) = Trc::default().init() {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }
    debug!(config = ?config, "Loaded configuration.");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args.command, config)) {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(command: Command, config: Config) -> Result<(), CommandError> {
    let client = || {
        ClientBuilder::new(config.base_url.clone())
            .timeout(config.timeout())
            .build()
    };

    match command {
        Command::Ls { repo, path } => commands::ls(&client()?, &repo.addr(&config, path)).await,
        Command::Cat { repo, path } => {
            commands::cat(&client()?, &repo.addr(&config, Some(path))).await
        }
        Command::Log { repo, path, start } => {
            commands::log(&client()?, &repo.addr(&config, path), start.as_deref()).await
        }
        Command::Blame { repo, path } => {
            commands::blame(&client()?, &repo.addr(&config, Some(path))).await
        }
        Command::Projects => commands::projects(&client()?).await,
        Command::Browse { repo, path } => {
            let addr = repo.addr(&config, path);
            commands::browse(client()?, addr).await
        }
        Command::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
