use std::process::ExitCode;

use clap::Parser;
use goldscout::adapter::inbound::cli::command::Cli;
use goldscout::adapter::inbound::cli::{self, output};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli::run(cli).await.map_err(anyhow::Error::from) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
