//! WiFi Aware (NAN) capability and discovery-session core.
//! Host-driven: no I/O; hosts feed platform facts and intents, core returns state.

pub mod capability;
pub mod core;
pub mod ffi;
pub mod session;

pub use capability::{
    evaluate, probe, CapabilityError, CapabilityResult, CapabilitySource, OsVersion,
    PlatformSupport, UnsupportedReason,
};
pub use crate::core::{AwareCore, CORE_VERSION};
pub use session::{DiscoverySession, SessionError, SessionInfo, SessionState};
