//! Discovery-session state machine: Idle -> Discovering -> Idle (stop) or
//! Stopped (terminal close). At most one session per `DiscoverySession`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capability::UnsupportedReason;

/// Session lifecycle state, published to hosts for rendering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// No discovery running; start is legal (capability permitting).
    Idle,
    /// A discovery attempt is active.
    Discovering,
    /// Terminal: the session owner is shutting down; start is illegal.
    Stopped,
}

/// Identity and start time of the active discovery attempt.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo {
    pub id: Uuid,
    pub started_at: Instant,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Start refused: the last capability probe says the device cannot
    /// discover (or no probe has run). Non-fatal; disables start controls.
    #[error("WiFi Aware unavailable: {reason}")]
    Capability { reason: UnsupportedReason },
    /// Double start. Callers treat this as a logged no-op, never a crash.
    #[error("discovery already running")]
    AlreadyDiscovering,
    /// Start after terminal close.
    #[error("session closed")]
    Terminated,
}

/// The state machine itself. Capability gating is the coordinator's job
/// (`AwareCore`); this type only enforces transition legality.
#[derive(Debug)]
pub struct DiscoverySession {
    state: SessionState,
    active: Option<SessionInfo>,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            active: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Info for the active attempt; None unless `Discovering`.
    pub fn active(&self) -> Option<&SessionInfo> {
        self.active.as_ref()
    }

    /// Begin a discovery attempt. Legal only from `Idle`.
    pub fn start(&mut self) -> Result<SessionInfo, SessionError> {
        match self.state {
            SessionState::Idle => {
                let info = SessionInfo {
                    id: Uuid::new_v4(),
                    started_at: Instant::now(),
                };
                self.state = SessionState::Discovering;
                self.active = Some(info);
                Ok(info)
            }
            SessionState::Discovering => Err(SessionError::AlreadyDiscovering),
            SessionState::Stopped => Err(SessionError::Terminated),
        }
    }

    /// End the active attempt and return to `Idle`. Idempotent: a no-op
    /// from `Idle`, and `Stopped` stays terminal.
    pub fn stop(&mut self) -> SessionState {
        if self.state == SessionState::Discovering {
            self.state = SessionState::Idle;
            self.active = None;
        }
        self.state
    }

    /// Terminal teardown (process exit). Unconditional and idempotent.
    pub fn close(&mut self) -> SessionState {
        self.state = SessionState::Stopped;
        self.active = None;
        self.state
    }
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}
