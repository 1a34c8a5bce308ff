//! Capability probe: is WiFi Aware (NAN) usable on this device?
//! Pure branching over platform-reported facts; fails closed when the
//! platform query itself is unreachable.

use serde::{Deserialize, Serialize};

/// Minimum OS version gate. Compared as (major, minor).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for OsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Raw facts a platform reports: the two NAN role capabilities plus the
/// OS version when the platform gates the feature on one (mobile hosts do;
/// Linux reports None).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformSupport {
    pub publisher: bool,
    pub subscriber: bool,
    pub os_version: Option<OsVersion>,
}

/// Why WiFi Aware is unavailable. `Display` texts are the user-facing
/// messages the presentation shell shows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum UnsupportedReason {
    #[error("Device hardware does not support WiFi Aware (neither publisher nor subscriber)")]
    Neither,
    #[error("Device hardware does not support WiFi Aware publisher")]
    Publisher,
    #[error("Device hardware does not support WiFi Aware subscriber")]
    Subscriber,
    #[error("WiFi Aware requires OS version {required} or later")]
    OsTooOld { required: OsVersion },
    #[error("Platform capability query unavailable")]
    PlatformUnavailable,
}

/// The platform query itself failed (not "the device lacks the hardware";
/// "we could not even ask"). Probe callers fail closed on this.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("capability query failed: {0}")]
    QueryFailed(String),
}

/// Outcome of one probe. Immutable; not persisted. `reason` is present
/// exactly when `supported` is false.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CapabilityResult {
    pub supported: bool,
    pub reason: Option<UnsupportedReason>,
}

impl CapabilityResult {
    pub fn supported() -> Self {
        Self {
            supported: true,
            reason: None,
        }
    }

    pub fn unsupported(reason: UnsupportedReason) -> Self {
        Self {
            supported: false,
            reason: Some(reason),
        }
    }

    /// Human-readable status line for the host UI.
    pub fn message(&self) -> String {
        match &self.reason {
            None => "WiFi Aware is supported on this device".to_string(),
            Some(r) => format!("WiFi Aware not available: {r}"),
        }
    }
}

/// Platform boundary: how the host answers "what does this device support?".
/// Implementations read ambient platform state and must not block.
pub trait CapabilitySource {
    fn support(&self) -> Result<PlatformSupport, CapabilityError>;
}

/// The four-branch check over the two role booleans. Supported only when
/// both roles are available; reason precedence: neither, publisher-only
/// missing, subscriber-only missing.
pub fn evaluate(publisher: bool, subscriber: bool) -> CapabilityResult {
    match (publisher, subscriber) {
        (true, true) => CapabilityResult::supported(),
        (false, false) => CapabilityResult::unsupported(UnsupportedReason::Neither),
        (false, true) => CapabilityResult::unsupported(UnsupportedReason::Publisher),
        (true, false) => CapabilityResult::unsupported(UnsupportedReason::Subscriber),
    }
}

/// Probe through a platform source, with an optional minimum-OS gate.
/// The gate is checked first: an old OS masks the hardware answer. A source
/// error never propagates; it becomes unsupported with a
/// platform-unavailable reason.
pub fn probe(source: &dyn CapabilitySource, min_os: Option<OsVersion>) -> CapabilityResult {
    let support = match source.support() {
        Ok(s) => s,
        Err(_) => return CapabilityResult::unsupported(UnsupportedReason::PlatformUnavailable),
    };
    if let Some(required) = min_os {
        match support.os_version {
            Some(v) if v >= required => {}
            _ => return CapabilityResult::unsupported(UnsupportedReason::OsTooOld { required }),
        }
    }
    evaluate(support.publisher, support.subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<PlatformSupport, ()>);

    impl CapabilitySource for FixedSource {
        fn support(&self) -> Result<PlatformSupport, CapabilityError> {
            self.0
                .map_err(|_| CapabilityError::QueryFailed("test".into()))
        }
    }

    #[test]
    fn both_supported() {
        let r = evaluate(true, true);
        assert!(r.supported);
        assert_eq!(r.reason, None);
    }

    #[test]
    fn neither_supported() {
        let r = evaluate(false, false);
        assert!(!r.supported);
        assert_eq!(
            r.reason.unwrap().to_string(),
            "Device hardware does not support WiFi Aware (neither publisher nor subscriber)"
        );
    }

    #[test]
    fn publisher_missing() {
        let r = evaluate(false, true);
        assert!(!r.supported);
        assert_eq!(
            r.reason.unwrap().to_string(),
            "Device hardware does not support WiFi Aware publisher"
        );
    }

    #[test]
    fn subscriber_missing() {
        let r = evaluate(true, false);
        assert!(!r.supported);
        assert_eq!(
            r.reason.unwrap().to_string(),
            "Device hardware does not support WiFi Aware subscriber"
        );
    }

    #[test]
    fn probe_fails_closed_on_source_error() {
        let r = probe(&FixedSource(Err(())), None);
        assert!(!r.supported);
        assert_eq!(r.reason, Some(UnsupportedReason::PlatformUnavailable));
    }

    #[test]
    fn probe_os_gate_blocks_old_version() {
        let src = FixedSource(Ok(PlatformSupport {
            publisher: true,
            subscriber: true,
            os_version: Some(OsVersion::new(17, 4)),
        }));
        let r = probe(&src, Some(OsVersion::new(18, 0)));
        assert!(!r.supported);
        assert_eq!(
            r.reason,
            Some(UnsupportedReason::OsTooOld {
                required: OsVersion::new(18, 0)
            })
        );
    }

    #[test]
    fn probe_os_gate_blocks_unknown_version() {
        let src = FixedSource(Ok(PlatformSupport {
            publisher: true,
            subscriber: true,
            os_version: None,
        }));
        let r = probe(&src, Some(OsVersion::new(18, 0)));
        assert!(!r.supported);
    }

    #[test]
    fn probe_os_gate_masks_hardware_reason() {
        // Old OS wins over the hardware branch.
        let src = FixedSource(Ok(PlatformSupport {
            publisher: false,
            subscriber: false,
            os_version: Some(OsVersion::new(17, 0)),
        }));
        let r = probe(&src, Some(OsVersion::new(18, 0)));
        assert!(matches!(
            r.reason,
            Some(UnsupportedReason::OsTooOld { .. })
        ));
    }

    #[test]
    fn probe_passes_gate_and_evaluates() {
        let src = FixedSource(Ok(PlatformSupport {
            publisher: true,
            subscriber: true,
            os_version: Some(OsVersion::new(18, 1)),
        }));
        let r = probe(&src, Some(OsVersion::new(18, 0)));
        assert!(r.supported);
    }

    #[test]
    fn probe_without_gate_ignores_os_version() {
        let src = FixedSource(Ok(PlatformSupport {
            publisher: true,
            subscriber: true,
            os_version: None,
        }));
        let r = probe(&src, None);
        assert!(r.supported);
    }

    #[test]
    fn message_texts() {
        assert_eq!(
            evaluate(true, true).message(),
            "WiFi Aware is supported on this device"
        );
        assert!(evaluate(false, true)
            .message()
            .starts_with("WiFi Aware not available: "));
    }

    #[test]
    fn os_version_ordering() {
        assert!(OsVersion::new(18, 0) > OsVersion::new(17, 9));
        assert!(OsVersion::new(18, 1) > OsVersion::new(18, 0));
        assert!(OsVersion::new(18, 0) >= OsVersion::new(18, 0));
    }
}
