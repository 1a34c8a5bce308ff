//! Host-driven coordinator: hosts feed platform facts and intents,
//! `AwareCore` gates session transitions on the latest capability probe.

use crate::capability::{self, CapabilityResult, CapabilitySource, OsVersion, UnsupportedReason};
use crate::session::{DiscoverySession, SessionError, SessionInfo, SessionState};

/// Core version, exported through the C ABI so hosts can sanity-check
/// the linked library.
pub const CORE_VERSION: u8 = 1;

/// One instance per process. Owning a single `DiscoverySession` is what
/// guarantees at most one active discovery at a time; hosts that share the
/// core across threads wrap it in a mutex so a racing stop/start pair can
/// never observe two `Discovering` states.
pub struct AwareCore {
    capability: Option<CapabilityResult>,
    session: DiscoverySession,
}

impl AwareCore {
    pub fn new() -> Self {
        Self {
            capability: None,
            session: DiscoverySession::new(),
        }
    }

    /// Store the latest probe outcome. Hosts that probe out-of-band (mobile
    /// apps reading platform booleans) call this; the daemon uses
    /// [`probe_with`](Self::probe_with).
    pub fn record_capability(&mut self, result: CapabilityResult) {
        self.capability = Some(result);
    }

    /// Probe through a platform source and record the outcome.
    pub fn probe_with(
        &mut self,
        source: &dyn CapabilitySource,
        min_os: Option<OsVersion>,
    ) -> &CapabilityResult {
        let result = capability::probe(source, min_os);
        self.capability.insert(result)
    }

    /// Latest recorded probe, if any.
    pub fn capability(&self) -> Option<&CapabilityResult> {
        self.capability.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Active attempt info; None unless discovering.
    pub fn active_session(&self) -> Option<&SessionInfo> {
        self.session.active()
    }

    /// Start discovery. Refused unless the last recorded probe says
    /// supported; an unprobed core counts as unsupported (fail closed).
    /// On refusal the session state is unchanged.
    pub fn start_discovery(&mut self) -> Result<SessionInfo, SessionError> {
        match &self.capability {
            Some(c) if c.supported => {}
            Some(c) => {
                return Err(SessionError::Capability {
                    reason: c
                        .reason
                        .clone()
                        .unwrap_or(UnsupportedReason::PlatformUnavailable),
                })
            }
            None => {
                return Err(SessionError::Capability {
                    reason: UnsupportedReason::PlatformUnavailable,
                })
            }
        }
        self.session.start()
    }

    /// Stop discovery. Idempotent and infallible; safe to call at any time.
    pub fn stop_discovery(&mut self) -> SessionState {
        self.session.stop()
    }

    /// Terminal teardown on process exit.
    pub fn close(&mut self) -> SessionState {
        self.session.close()
    }
}

impl Default for AwareCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::evaluate;

    #[test]
    fn end_to_end_supported_device() {
        let mut core = AwareCore::new();
        let probe = evaluate(true, true);
        assert!(probe.supported);
        assert_eq!(probe.reason, None);
        core.record_capability(probe);

        core.start_discovery().unwrap();
        assert_eq!(core.state(), SessionState::Discovering);
        assert!(core.active_session().is_some());

        core.stop_discovery();
        assert_eq!(core.state(), SessionState::Idle);
    }

    #[test]
    fn end_to_end_unsupported_device() {
        let mut core = AwareCore::new();
        let probe = evaluate(false, false);
        assert!(!probe.supported);
        assert_eq!(
            probe.reason.as_ref().unwrap().to_string(),
            "Device hardware does not support WiFi Aware (neither publisher nor subscriber)"
        );
        core.record_capability(probe);

        let err = core.start_discovery().unwrap_err();
        assert!(matches!(err, SessionError::Capability { .. }));
        assert_eq!(core.state(), SessionState::Idle);
    }

    #[test]
    fn start_without_probe_fails_closed() {
        let mut core = AwareCore::new();
        let err = core.start_discovery().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Capability {
                reason: UnsupportedReason::PlatformUnavailable
            }
        ));
        assert_eq!(core.state(), SessionState::Idle);
    }

    #[test]
    fn double_start_keeps_single_session() {
        let mut core = AwareCore::new();
        core.record_capability(evaluate(true, true));
        let first = core.start_discovery().unwrap();
        let err = core.start_discovery().unwrap_err();
        assert!(matches!(err, SessionError::AlreadyDiscovering));
        assert_eq!(core.active_session().unwrap().id, first.id);
    }

    #[test]
    fn capability_can_be_revoked_between_sessions() {
        let mut core = AwareCore::new();
        core.record_capability(evaluate(true, true));
        core.start_discovery().unwrap();
        core.stop_discovery();

        // A later probe says the platform went away; start must refuse.
        core.record_capability(evaluate(false, true));
        assert!(core.start_discovery().is_err());
        assert_eq!(core.state(), SessionState::Idle);
    }

    #[test]
    fn close_then_start_is_terminated() {
        let mut core = AwareCore::new();
        core.record_capability(evaluate(true, true));
        core.close();
        assert!(matches!(
            core.start_discovery(),
            Err(SessionError::Terminated)
        ));
    }

    #[test]
    fn stop_before_any_start_is_safe() {
        let mut core = AwareCore::new();
        assert_eq!(core.stop_discovery(), SessionState::Idle);
    }
}
