//! NAN support probe via nl80211, using `iw` output. The NL80211_IFTYPE_NAN
//! entry under "Supported interface modes" means the hardware and driver can
//! run WiFi Aware; the NAN iftype covers both roles, so publisher and
//! subscriber report the same answer on Linux.

use std::process::Command;

use aware_core::{CapabilityError, CapabilitySource, PlatformSupport};

/// Capability source backed by the `iw` tool: `iw dev <iface> info` to find
/// the phy, then `iw phy <phy> info` for supported interface modes.
pub struct IwCapabilitySource {
    interface: String,
}

impl IwCapabilitySource {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }
}

impl CapabilitySource for IwCapabilitySource {
    fn support(&self) -> Result<PlatformSupport, CapabilityError> {
        let dev_info = run_iw(&["dev", &self.interface, "info"])?;
        let phy = phy_from_dev_info(&dev_info).ok_or_else(|| {
            CapabilityError::QueryFailed(format!("no wiphy index for {}", self.interface))
        })?;
        let phy_info = run_iw(&["phy", &phy, "info"])?;
        let nan = supported_modes(&phy_info).iter().any(|m| m == "NAN");
        Ok(PlatformSupport {
            publisher: nan,
            subscriber: nan,
            os_version: None,
        })
    }
}

fn run_iw(args: &[&str]) -> Result<String, CapabilityError> {
    let out = Command::new("iw")
        .args(args)
        .output()
        .map_err(|e| CapabilityError::QueryFailed(format!("iw {}: {e}", args.join(" "))))?;
    if !out.status.success() {
        return Err(CapabilityError::QueryFailed(format!(
            "iw {} exited with {}",
            args.join(" "),
            out.status
        )));
    }
    String::from_utf8(out.stdout)
        .map_err(|_| CapabilityError::QueryFailed("iw output not UTF-8".to_string()))
}

/// Extract the phy name from `iw dev <iface> info` output ("wiphy 0" -> "phy0").
fn phy_from_dev_info(output: &str) -> Option<String> {
    for line in output.lines() {
        let line = line.trim();
        if let Some(idx) = line.strip_prefix("wiphy ") {
            let idx: u32 = idx.trim().parse().ok()?;
            return Some(format!("phy{idx}"));
        }
    }
    None
}

/// Collect mode names from the "Supported interface modes" block of
/// `iw phy <phy> info` output.
fn supported_modes(output: &str) -> Vec<String> {
    let mut modes = Vec::new();
    let mut in_block = false;
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Supported interface modes") {
            in_block = true;
            continue;
        }
        if in_block {
            if let Some(mode) = trimmed.strip_prefix("* ") {
                modes.push(mode.trim().to_string());
            } else if !trimmed.is_empty() {
                break;
            }
        }
    }
    modes
}
