//! C ABI for linking aware-core as a static library from Android (JNI) or
//! iOS (Swift) hosts. The host reads the platform capability booleans and
//! feeds them in; the core owns the gating and the session state machine.

use std::ffi::c_void;
use std::os::raw::c_int;

use crate::capability::evaluate;
use crate::core::{AwareCore, CORE_VERSION};
use crate::session::{SessionError, SessionState};

/// Returns the core version. Used so the staticlib exports a C symbol and is linkable.
#[no_mangle]
pub extern "C" fn aware_core_version() -> u8 {
    CORE_VERSION
}

/// Create a new core instance. Returns opaque handle.
#[no_mangle]
pub extern "C" fn aware_core_create() -> *mut c_void {
    let core = AwareCore::new();
    Box::into_raw(Box::new(core)) as *mut c_void
}

/// Destroy core instance. No-op if h is null.
#[no_mangle]
pub extern "C" fn aware_core_destroy(h: *mut c_void) {
    if h.is_null() {
        return;
    }
    let _ = unsafe { Box::from_raw(h as *mut AwareCore) };
}

/// Record a capability probe from the host's platform booleans (nonzero =
/// supported). Returns 1 if WiFi Aware is supported, 0 if not, -1 if h null.
#[no_mangle]
pub extern "C" fn aware_core_record_probe(
    h: *mut c_void,
    publisher_supported: c_int,
    subscriber_supported: c_int,
) -> c_int {
    if h.is_null() {
        return -1;
    }
    let core = unsafe { &mut *(h as *mut AwareCore) };
    let result = evaluate(publisher_supported != 0, subscriber_supported != 0);
    let supported = result.supported;
    core.record_capability(result);
    if supported {
        1
    } else {
        0
    }
}

/// Copy the UTF-8 capability status message into out_buf (no NUL appended).
/// Returns bytes written, or -1 if h/out_buf null, no probe recorded yet,
/// or the buffer is too small.
#[no_mangle]
pub extern "C" fn aware_core_capability_message(
    h: *mut c_void,
    out_buf: *mut u8,
    out_buf_len: usize,
) -> c_int {
    if h.is_null() || out_buf.is_null() {
        return -1;
    }
    let core = unsafe { &*(h as *const AwareCore) };
    let msg = match core.capability() {
        Some(c) => c.message(),
        None => return -1,
    };
    let bytes = msg.as_bytes();
    if bytes.len() > out_buf_len {
        return -1;
    }
    unsafe {
        out_buf.copy_from_nonoverlapping(bytes.as_ptr(), bytes.len());
    }
    bytes.len() as c_int
}

/// Start discovery. Returns 0 on success, -1 if h null, -2 if capability
/// unsupported (or never probed), -3 if already discovering, -4 if closed.
#[no_mangle]
pub extern "C" fn aware_core_start_discovery(h: *mut c_void) -> c_int {
    if h.is_null() {
        return -1;
    }
    let core = unsafe { &mut *(h as *mut AwareCore) };
    match core.start_discovery() {
        Ok(_) => 0,
        Err(SessionError::Capability { .. }) => -2,
        Err(SessionError::AlreadyDiscovering) => -3,
        Err(SessionError::Terminated) => -4,
    }
}

/// Stop discovery. Idempotent; returns 0, or -1 if h null.
#[no_mangle]
pub extern "C" fn aware_core_stop_discovery(h: *mut c_void) -> c_int {
    if h.is_null() {
        return -1;
    }
    let core = unsafe { &mut *(h as *mut AwareCore) };
    core.stop_discovery();
    0
}

/// Current session state: 0 Idle, 1 Discovering, 2 Stopped, -1 if h null.
#[no_mangle]
pub extern "C" fn aware_core_session_state(h: *mut c_void) -> c_int {
    if h.is_null() {
        return -1;
    }
    let core = unsafe { &*(h as *const AwareCore) };
    match core.state() {
        SessionState::Idle => 0,
        SessionState::Discovering => 1,
        SessionState::Stopped => 2,
    }
}
