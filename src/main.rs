//! ClutterLog terminal front end

mod cli;
mod screens;

use clap::Parser;
use clutterlog_core::config::AppConfig;
use clutterlog_core::AppState;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.data_dir.clone()).map_err(anyhow::Error::msg)?;
    config.ensure_dirs().map_err(anyhow::Error::msg)?;

    // Logging is best effort; the command still runs without it
    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), "ClutterLog") {
        eprintln!("Failed to init logger: {}", e);
    }

    let state = match AppState::open(config).await {
        Ok(state) => {
            let _ = rolling_logger::info("DB init success");
            state
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            anyhow::bail!("Failed to open database: {}", e);
        }
    };

    let result = screens::run(&state, cli.command).await;
    state.db_state.close().await;
    result
}
