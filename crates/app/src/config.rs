use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the durable session files (default: `.applica`).
    pub data_dir: PathBuf,
    /// Feed endpoint; when unset the hard-coded posts are served.
    pub feed_url: Option<String>,
    /// Simulated latency of the hard-coded feed (default: 500 ms).
    pub feed_mock_delay: Duration,
    /// Events kept by the in-memory audit buffer before it is cleared
    /// (default: `100`).
    pub audit_buffer_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default     |
    /// |------------------------------|-------------|
    /// | `APPLICA_DATA_DIR`           | `.applica`  |
    /// | `APPLICA_FEED_URL`           | unset       |
    /// | `APPLICA_FEED_MOCK_DELAY_MS` | `500`       |
    /// | `APPLICA_AUDIT_BUFFER`       | `100`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("APPLICA_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".applica"));

        let feed_url = lookup("APPLICA_FEED_URL").filter(|s| !s.trim().is_empty());

        let delay_ms: u64 = parse_var(&lookup, "APPLICA_FEED_MOCK_DELAY_MS", "u64", 500)?;
        let audit_buffer_capacity: usize =
            parse_var(&lookup, "APPLICA_AUDIT_BUFFER", "usize", 100)?;

        Ok(Self {
            data_dir,
            feed_url,
            feed_mock_delay: Duration::from_millis(delay_ms),
            audit_buffer_capacity,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
