//! Session service: owns the shared core, applies start/stop commands from
//! the command channel, publishes session state on a watch channel. State is
//! published, not polled; a stop is only visible after the transition
//! completed, so nothing leaks past it.

use std::sync::Arc;
use std::time::Duration;

use aware_core::{AwareCore, SessionError, SessionState};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub type SharedCore = Arc<Mutex<AwareCore>>;

/// Intents from the presentation shell (or signal handler).
#[derive(Debug, Clone, Copy)]
pub enum Command {
    Start,
    Stop,
}

/// Spawn the service loop. Returns the command sender, the state receiver,
/// and the loop's join handle. Dropping every command sender tears the
/// service down: the core is closed and the final `Stopped` state published.
pub fn spawn(
    core: SharedCore,
    discovery_timeout: Option<Duration>,
) -> (
    mpsc::UnboundedSender<Command>,
    watch::Receiver<SessionState>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SessionState::Idle);
    let handle = tokio::spawn(run(core, discovery_timeout, cmd_rx, state_tx));
    (cmd_tx, state_rx, handle)
}

async fn run(
    core: SharedCore,
    discovery_timeout: Option<Duration>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<SessionState>,
) {
    let mut deadline: Option<tokio::time::Instant> = None;
    loop {
        // select! evaluates the disabled branch's future too; park it far out.
        let timer = tokio::time::sleep_until(
            deadline.unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600)),
        );
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                None => break,
                Some(Command::Start) => {
                    let mut c = core.lock().await;
                    match c.start_discovery() {
                        Ok(session) => {
                            info!(session = %session.id, "discovery started");
                            deadline = discovery_timeout
                                .map(|t| tokio::time::Instant::now() + t);
                        }
                        Err(SessionError::AlreadyDiscovering) => {
                            warn!("start ignored: discovery already running");
                        }
                        Err(e) => {
                            warn!(error = %e, "start refused");
                        }
                    }
                    let _ = state_tx.send(c.state());
                }
                Some(Command::Stop) => {
                    let mut c = core.lock().await;
                    let state = c.stop_discovery();
                    deadline = None;
                    let _ = state_tx.send(state);
                    info!("discovery stopped");
                }
            },
            _ = timer, if deadline.is_some() => {
                let mut c = core.lock().await;
                let state = c.stop_discovery();
                deadline = None;
                let _ = state_tx.send(state);
                info!("discovery timeout reached; session stopped");
            }
        }
    }
    let mut c = core.lock().await;
    let state = c.close();
    let _ = state_tx.send(state);
}
