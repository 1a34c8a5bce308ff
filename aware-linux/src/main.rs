// Aware Linux daemon: NAN capability probe + discovery session service.

mod config;
mod nl80211;
mod service;

use std::sync::Arc;
use std::time::Duration;

use aware_core::AwareCore;
use tokio::sync::Mutex;
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    for arg in std::env::args().skip(1) {
        if arg == "--version" || arg == "-V" {
            println!("aware-linux {}", VERSION);
            return Ok(());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load();
    info!(interface = %cfg.interface, "starting aware-linux");

    // Probe before anything renders or runs; start intents are gated on this.
    let source = nl80211::IwCapabilitySource::new(cfg.interface.clone());
    let mut core = AwareCore::new();
    let probe = core.probe_with(&source, None).clone();
    info!("{}", probe.message());

    let core = Arc::new(Mutex::new(core));
    let timeout = cfg.discovery_timeout_secs.map(Duration::from_secs);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (cmd_tx, mut state_rx, handle) = service::spawn(core, timeout);

        tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                let state = *state_rx.borrow();
                info!(?state, "session state");
            }
        });

        if probe.supported {
            if cfg.auto_start {
                let _ = cmd_tx.send(service::Command::Start);
            }
        } else {
            warn!("discovery disabled: start intents will be refused");
        }

        shutdown_signal().await?;
        info!("shutting down");
        let _ = cmd_tx.send(service::Command::Stop);
        drop(cmd_tx);
        // Service closes the core before exiting; wait for it.
        let _ = handle.await;
        Ok::<(), anyhow::Error>(())
    })?;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM (Unix). The session is stopped and the core
/// closed before the process exits.
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }
    Ok(())
}
