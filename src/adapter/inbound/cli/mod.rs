//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod evaluate;
pub mod ladder;
pub mod output;

use std::path::{Path, PathBuf};

use self::command::{CheckCommand, Cli, Commands, ConfigPathArg};
use self::output::OutputConfig;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolve the configuration for a command.
///
/// An explicit path must exist. Without one, `config.toml` is loaded when
/// present and defaults apply otherwise.
pub fn resolve_config(arg: &ConfigPathArg) -> Result<Config> {
    match &arg.config {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH),
        None => Config::parse_toml(""),
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    let mut logging = config.logging.clone();
    match cli.verbose {
        0 if cli.quiet => logging.level = "error".into(),
        0 => {}
        1 => logging.level = "debug".into(),
        _ => logging.level = "trace".into(),
    }
    logging.init();
}

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Ladder(arg) => {
            let config = resolve_config(arg)?;
            init_logging(&cli, &config);
            ladder::execute(&config).await
        }
        Commands::Evaluate(args) => {
            let config = resolve_config(&args.config)?;
            init_logging(&cli, &config);
            evaluate::execute(args, &config).await
        }
        Commands::Check(CheckCommand::Config(arg)) => {
            let path = arg
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
            check::execute_config(&path)
        }
    }
}
