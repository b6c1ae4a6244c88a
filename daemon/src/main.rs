//! stakeset daemon: entry point for running the validator pipeline.

use clap::Parser;
use std::path::PathBuf;

use stakeset_node::{init_logging, BlockScript, LogFormat, NodeConfig, StoreBackend, ValidatorApp};

#[derive(Parser)]
#[command(name = "stakeset-daemon", about = "stakeset validator node daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long, env = "STAKESET_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for LMDB storage.
    #[arg(long, env = "STAKESET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep state in memory instead of LMDB.
    #[arg(long, env = "STAKESET_MEMORY")]
    memory: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "STAKESET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STAKESET_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    #[command(name = "config")]
    Config,

    /// Print the genesis validator set as JSON.
    #[command(name = "validators")]
    Validators,

    /// Replay a JSON block script and print each block's result as JSON.
    #[command(name = "replay")]
    Replay {
        /// Path to the block script.
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)?,
        None => NodeConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
        config.store = StoreBackend::Lmdb;
    }
    if cli.memory {
        config.store = StoreBackend::Memory;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Validators => {
            let app = ValidatorApp::open(&config)?;
            println!("{}", serde_json::to_string_pretty(&app.init_validators()?)?);
        }
        Command::Replay { script } => {
            let script = BlockScript::from_json_file(&script)?;
            tracing::info!(
                blocks = script.blocks.len(),
                store = ?config.store,
                "replaying block script"
            );
            let mut app = ValidatorApp::open(&config)?;
            for block in &script.blocks {
                let result = block.apply(&mut app)?;
                println!("{}", serde_json::to_string(&result)?);
            }
            tracing::info!(height = app.height(), "replay finished");
        }
    }

    Ok(())
}
