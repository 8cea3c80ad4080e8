use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use team_revenue::args::{Args, Command};
use team_revenue::{commands, default_path, Config, ErrorType, Result};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let common = args.common();
    let format = common.format();

    // Route to appropriate command handler
    match args.command() {
        Command::Init(init_args) => {
            let path = match init_args.output().or(common.config()) {
                Some(p) => p.to_path_buf(),
                None => default_config_path()?,
            };
            commands::init(&path, init_args.data_path())
                .await?
                .print(format)
        }
        Command::Summary => {
            let config = load_config(&args).await?;
            commands::summary(&config).await?.print(format)
        }
        Command::Teams => {
            let config = load_config(&args).await?;
            commands::teams(&config).await?.print(format)
        }
        Command::Totals => {
            let config = load_config(&args).await?;
            commands::totals(&config).await?.print(format)
        }
        Command::Rank => {
            let config = load_config(&args).await?;
            commands::rank(&config).await?.print(format)
        }
        Command::Melt => {
            let config = load_config(&args).await?;
            commands::melt(&config).await?.print(format)
        }
        Command::Dates => {
            let config = load_config(&args).await?;
            commands::dates(&config).await?.print(format)
        }
        Command::Filter(filter_args) => {
            let config = load_config(&args).await?;
            commands::filter(&config, &filter_args.selection())
                .await?
                .print(format)
        }
    }
}

/// Loads the config file, if any, and applies `--data` on top of it.
async fn load_config(args: &Args) -> Result<Config> {
    let common = args.common();
    Ok(Config::discover(common.config())
        .await?
        .with_data_path(common.data().map(PathBuf::from)))
}

fn default_config_path() -> Result<PathBuf> {
    default_path().ok_or_else(|| {
        team_revenue::Error::from_message(
            ErrorType::Config,
            "Unable to find your config directory; pass --output or --config instead",
        )
    })
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "team_revenue={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
