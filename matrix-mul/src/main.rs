use std::sync::Arc;

use clap::Parser;
use matrix_mul::{Cli, RoundLog};
use rounds::{RoundController, Shutdown};
use tokio::{signal, task};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(workers = cli.workers, size = cli.size, algorithm = ?cli.algorithm, "starting");

    let mut controller =
        RoundController::new(cli.round_config(), cli.algorithm, cli.fill(), Arc::new(RoundLog))?;

    let shutdown = Shutdown::new();
    let token = shutdown.clone();
    let initial = cli.size;
    let mut rounds = task::spawn_blocking(move || controller.run(initial, &token));

    let completed = tokio::select! {
        result = &mut rounds => result??,
        _ = signal::ctrl_c() => {
            info!("interrupted, finishing the current round");
            shutdown.cancel();
            rounds.await??
        }
    };

    info!(rounds = completed, "stopped");
    Ok(())
}
