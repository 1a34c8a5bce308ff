//! Load config from file and environment.

use serde::Deserialize;
use std::path::PathBuf;

/// Daemon configuration. File: ~/.config/aware/config.toml or /etc/aware/config.toml.
/// Env overrides: AWARE_INTERFACE, AWARE_AUTO_START, AWARE_DISCOVERY_TIMEOUT_SECS.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Wireless interface to probe for NAN support (default wlan0).
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Start discovery at boot when the capability probe passes (default true).
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
    /// Auto-stop a discovery session after this many seconds. Absent = no limit.
    #[serde(default)]
    pub discovery_timeout_secs: Option<u64>,
}

fn default_interface() -> String {
    "wlan0".to_string()
}
fn default_auto_start() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            auto_start: default_auto_start(),
            discovery_timeout_secs: None,
        }
    }
}

/// Load config: merge default, then config file (if present), then env vars.
pub fn load() -> Config {
    let mut c = load_file().unwrap_or_else(Config::default);
    if let Ok(s) = std::env::var("AWARE_INTERFACE") {
        if !s.is_empty() {
            c.interface = s;
        }
    }
    if let Ok(s) = std::env::var("AWARE_AUTO_START") {
        match s.as_str() {
            "1" | "true" => c.auto_start = true,
            "0" | "false" => c.auto_start = false,
            _ => {}
        }
    }
    if let Ok(s) = std::env::var("AWARE_DISCOVERY_TIMEOUT_SECS") {
        if let Ok(t) = s.parse::<u64>() {
            c.discovery_timeout_secs = Some(t);
        }
    }
    c
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/aware/config.toml"));
    }
    out.push(PathBuf::from("/etc/aware/config.toml"));
    out
}

fn load_file() -> Option<Config> {
    for p in config_paths() {
        if p.exists() {
            if let Ok(s) = std::fs::read_to_string(&p) {
                if let Ok(c) = toml::from_str::<Config>(&s) {
                    return Some(c);
                }
            }
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.interface, "wlan0");
        assert!(c.auto_start);
        assert_eq!(c.discovery_timeout_secs, None);
    }

    #[test]
    fn full_file_parses() {
        let c: Config = toml::from_str(
            "interface = \"wlan1\"\nauto_start = false\ndiscovery_timeout_secs = 30\n",
        )
        .unwrap();
        assert_eq!(c.interface, "wlan1");
        assert!(!c.auto_start);
        assert_eq!(c.discovery_timeout_secs, Some(30));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(toml::from_str::<Config>("bogus = 1\n").is_err());
    }
}
