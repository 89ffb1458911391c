//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "INVOICEDESK_DATA_DIR";
/// Environment variable capping attachment size, in bytes.
pub const MAX_ATTACHMENT_BYTES_ENV: &str = "INVOICEDESK_MAX_ATTACHMENT_BYTES";

/// 5 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("no data directory: set INVOICEDESK_DATA_DIR or pass --data-dir")]
    NoDataDir,
}

/// Runtime configuration shared by the binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory the file storage backend writes into.
    pub data_dir: PathBuf,
    pub max_attachment_bytes: u64,
}

impl AppConfig {
    /// Load from the process environment, falling back to the platform data
    /// directory (`$XDG_DATA_HOME/invoicedesk` and friends).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("invoicedesk"))
                .ok_or(ConfigError::NoDataDir)?,
        };

        let max_attachment_bytes = match lookup(MAX_ATTACHMENT_BYTES_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: MAX_ATTACHMENT_BYTES_ENV,
                        value: raw,
                    });
                }
            },
            None => DEFAULT_MAX_ATTACHMENT_BYTES,
        };

        Ok(Self {
            data_dir,
            max_attachment_bytes,
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn reads_explicit_values() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/invoices"),
            (MAX_ATTACHMENT_BYTES_ENV, "1024"),
        ]))
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/invoices"));
        assert_eq!(cfg.max_attachment_bytes, 1024);
    }

    #[test]
    fn attachment_limit_defaults_to_five_mib() {
        let cfg = AppConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "/tmp/x")])).unwrap();
        assert_eq!(cfg.max_attachment_bytes, DEFAULT_MAX_ATTACHMENT_BYTES);
    }

    #[test]
    fn rejects_bad_attachment_limit() {
        for bad in ["0", "-3", "lots"] {
            let err = AppConfig::from_lookup(lookup(&[
                (DATA_DIR_ENV, "/tmp/x"),
                (MAX_ATTACHMENT_BYTES_ENV, bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        }
    }

    #[test]
    fn data_dir_override() {
        let cfg = AppConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "/tmp/a")]))
            .unwrap()
            .with_data_dir("/tmp/b");
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/b"));
    }
}
