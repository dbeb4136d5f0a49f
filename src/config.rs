use std::env;
use std::path::PathBuf;

use crate::data::DEFAULT_STORE_FILE;

/// Runtime settings. Environment variables override the defaults and
/// command-line flags override both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the saved questions.
    pub store_path: PathBuf,
    /// Whether `export` may dump the store as JSON.
    pub export_enabled: bool,
    /// Randomize question order when a quiz starts.
    pub shuffle: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            export_enabled: false,
            shuffle: true,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            store_path: lookup("SIMULADO_STORE")
                .map(PathBuf::from)
                .unwrap_or(default.store_path),
            export_enabled: lookup("SIMULADO_EXPORT")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default.export_enabled),
            shuffle: lookup("SIMULADO_SHUFFLE")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default.shuffle),
            log_filter: lookup("SIMULADO_LOG").unwrap_or(default.log_filter),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert!(!config.export_enabled);
        assert!(config.shuffle);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SIMULADO_STORE", "/tmp/q.json"),
            ("SIMULADO_EXPORT", "yes"),
            ("SIMULADO_SHUFFLE", "0"),
            ("SIMULADO_LOG", "simulado=debug"),
        ]);
        assert_eq!(config.store_path, PathBuf::from("/tmp/q.json"));
        assert!(config.export_enabled);
        assert!(!config.shuffle);
        assert_eq!(config.log_filter, "simulado=debug");
    }

    #[test]
    fn test_unparseable_flag_keeps_default() {
        let config = config_from(&[("SIMULADO_EXPORT", "maybe")]);
        assert!(!config.export_enabled);
    }
}
