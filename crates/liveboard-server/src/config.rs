//! Configuration types for the Liveboard service.
//!
//! All configuration is loaded from environment variables; every value
//! has a default so the binary starts with no environment at all.

use std::path::PathBuf;

use liveboard_store::FlushPolicy;

/// Default live channel identity to subscribe to.
const DEFAULT_CHANNEL: &str = "demo";
/// Default snapshot path, relative to the working directory.
const DEFAULT_DATA_FILE: &str = "data.json";
/// Default bind host.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
const DEFAULT_PORT: u16 = 3030;
/// Default snapshot debounce interval in milliseconds.
const DEFAULT_FLUSH_MS: u64 = 1000;
/// Default bounded event channel capacity.
const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Errors produced while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was present but unparseable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// The offending variable name.
        name: &'static str,
        /// Why it failed to parse.
        message: String,
    },
}

/// Complete service configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Live channel/source identity handed to the connector collaborator.
    pub channel: String,
    /// Snapshot document path.
    pub data_file: PathBuf,
    /// HTTP bind host.
    pub host: String,
    /// HTTP bind port.
    pub port: u16,
    /// Snapshot flush debounce in milliseconds (`0` = every mutation).
    pub flush_ms: u64,
    /// Bounded event channel capacity (backpressure point).
    pub queue_capacity: usize,
}

impl ServerSettings {
    /// Load configuration from environment variables.
    ///
    /// Variables (all optional):
    /// - `LIVEBOARD_CHANNEL` -- channel identity (default `demo`)
    /// - `LIVEBOARD_DATA_FILE` -- snapshot path (default `data.json`)
    /// - `LIVEBOARD_HOST` -- bind host (default `0.0.0.0`)
    /// - `LIVEBOARD_PORT` -- bind port (default `3030`)
    /// - `LIVEBOARD_FLUSH_MS` -- snapshot debounce in ms, `0` flushes on
    ///   every mutation (default `1000`)
    /// - `LIVEBOARD_EVENT_QUEUE` -- event channel capacity (default `1024`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but unparseable;
    /// absent variables take defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let channel =
            std::env::var("LIVEBOARD_CHANNEL").unwrap_or_else(|_| DEFAULT_CHANNEL.to_owned());
        let data_file = PathBuf::from(
            std::env::var("LIVEBOARD_DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.to_owned()),
        );
        let host = std::env::var("LIVEBOARD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_owned());

        let port = parse_var("LIVEBOARD_PORT", DEFAULT_PORT)?;
        let flush_ms = parse_var("LIVEBOARD_FLUSH_MS", DEFAULT_FLUSH_MS)?;
        let queue_capacity = parse_var("LIVEBOARD_EVENT_QUEUE", DEFAULT_QUEUE_CAPACITY)?;

        Ok(Self {
            channel,
            data_file,
            host,
            port,
            flush_ms,
            queue_capacity,
        })
    }

    /// The flush policy selected by `flush_ms`.
    pub const fn flush_policy(&self) -> FlushPolicy {
        FlushPolicy::from_interval_ms(self.flush_ms)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_owned(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            flush_ms: DEFAULT_FLUSH_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Parse an optional environment variable, falling back to a default.
fn parse_var<T: core::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: core::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_self_consistent() {
        let settings = ServerSettings::default();
        assert_eq!(settings.channel, "demo");
        assert_eq!(settings.port, 3030);
        assert_eq!(settings.data_file, PathBuf::from("data.json"));
        assert!(!settings.flush_policy().flush_on_mutation());
    }

    #[test]
    fn zero_flush_interval_selects_per_mutation_writes() {
        let settings = ServerSettings {
            flush_ms: 0,
            ..ServerSettings::default()
        };
        assert!(settings.flush_policy().flush_on_mutation());
    }
}
