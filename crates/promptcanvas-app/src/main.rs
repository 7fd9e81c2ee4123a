//! Main application entry point.

use clap::Parser;
use promptcanvas_app::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting PromptCanvas: {:?}", cli.command);

    match promptcanvas_app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
