//! Server configuration from the environment.

use std::net::SocketAddr;

use greentrace_network::DEFAULT_MAX_DISTANCE;
use thiserror::Error;

/// A configuration value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Connection threshold in degrees
    pub max_distance: f64,

    /// Load the community seed records at startup
    pub seed_community: bool,

    /// Seed for the catalogue classifier
    pub classifier_seed: u64,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_distance: DEFAULT_MAX_DISTANCE,
            seed_community: true,
            classifier_seed: 42,
        }
    }
}

impl VisConfig {
    /// Read `GREENTRACE_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_addr = parse_var(&lookup, "GREENTRACE_API_ADDR", defaults.api_addr)?;
        let max_distance: f64 =
            parse_var(&lookup, "GREENTRACE_MAX_DISTANCE", defaults.max_distance)?;
        if greentrace_network::validate_threshold(max_distance).is_err() {
            return Err(ConfigError::Invalid {
                name: "GREENTRACE_MAX_DISTANCE",
                value: max_distance.to_string(),
                reason: "must be finite and non-negative".into(),
            });
        }
        let seed_community =
            parse_var(&lookup, "GREENTRACE_SEED_COMMUNITY", defaults.seed_community)?;
        let classifier_seed =
            parse_var(&lookup, "GREENTRACE_CLASSIFIER_SEED", defaults.classifier_seed)?;

        Ok(Self {
            api_addr,
            max_distance,
            seed_community,
            classifier_seed,
        })
    }

    /// Replace the listen port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.api_addr.set_port(port);
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            })
        }
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.max_distance, 0.005);
    }

    #[test]
    fn reads_overrides() {
        let config = VisConfig::from_lookup(lookup(&[
            ("GREENTRACE_API_ADDR", "127.0.0.1:8081"),
            ("GREENTRACE_MAX_DISTANCE", "0.01"),
            ("GREENTRACE_SEED_COMMUNITY", "false"),
            ("GREENTRACE_CLASSIFIER_SEED", "7"),
        ]))
        .unwrap();

        assert_eq!(config.api_addr, "127.0.0.1:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_distance, 0.01);
        assert!(!config.seed_community);
        assert_eq!(config.classifier_seed, 7);
    }

    #[test]
    fn rejects_garbage() {
        assert!(VisConfig::from_lookup(lookup(&[("GREENTRACE_API_ADDR", "nowhere")])).is_err());
        assert!(VisConfig::from_lookup(lookup(&[("GREENTRACE_SEED_COMMUNITY", "maybe")])).is_err());
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = VisConfig::from_lookup(lookup(&[("GREENTRACE_MAX_DISTANCE", "-1")])).unwrap_err();
        assert!(err.to_string().contains("GREENTRACE_MAX_DISTANCE"));
    }

    #[test]
    fn port_override_keeps_host() {
        let config = VisConfig::default().with_port(9000);
        assert_eq!(config.api_addr.port(), 9000);
        assert!(config.api_addr.ip().is_unspecified());
    }
}
