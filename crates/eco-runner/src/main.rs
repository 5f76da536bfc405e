//! Runs the predator/prey grid forever, printing one snapshot per tick.

mod telemetry;

use anyhow::{Context, Result};
use eco_core::SimulationConfig;
use eco_world::Simulation;
use std::io::{self, Write};
use tokio::signal;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = SimulationConfig::default();

    telemetry::init_tracing()?;

    let pacing = Duration::from_millis(config.tick_interval_ms);
    let mut simulation = Simulation::new(config).context("failed to build simulation")?;

    info!(interval_ms = pacing.as_millis() as u64, "Starting ecosystem");

    tokio::select! {
        result = run_loop(&mut simulation, pacing) => {
            result?;
        }
        _ = shutdown_signal() => {}
    }

    info!(ticks = simulation.tick_count(), "Shutting down ecosystem");
    Ok(())
}

/// Tick, render, pause; only returns on an output error
async fn run_loop(simulation: &mut Simulation, pacing: Duration) -> Result<()> {
    let stdout = io::stdout();

    loop {
        simulation.tick();

        {
            let mut out = stdout.lock();
            simulation
                .render_to(&mut out)
                .context("failed to render grid")?;
            out.flush().context("failed to flush stdout")?;
        }

        sleep(pacing).await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
