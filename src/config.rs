//! Server configuration, read once from the environment at startup.
//!
//! # Environment Variables
//!
//! - `PORT` — TCP port for the IPv4 and IPv6 listeners (default: 5207)
//! - `APP_ENVIRONMENT` — `Development`, `Staging` or `Production` (default: Production)
//! - `OVERLAY_DOMAIN_SUFFIX` — suffix of overlay-network host names (default: `.ts.net`)
//! - `OVERLAY_TAILNET` — tailnet used to build the overlay host name (default: `tailb43185.ts.net`)

use std::fmt;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5207;
pub const DEFAULT_OVERLAY_SUFFIX: &str = ".ts.net";
pub const DEFAULT_OVERLAY_TAILNET: &str = "tailb43185.ts.net";

/// Errors raised while reading [`ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value '{value}': expected a port number (0-65535)")]
    InvalidPort { var: &'static str, value: String },
}

/// Runtime environment, as named by `APP_ENVIRONMENT`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
    Custom(String),
}

impl Environment {
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("development") {
            Self::Development
        } else if name.eq_ignore_ascii_case("staging") {
            Self::Staging
        } else if name.eq_ignore_ascii_case("production") || name.is_empty() {
            Self::Production
        } else {
            Self::Custom(name.to_string())
        }
    }

    /// API documentation is only served in development.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("Development"),
            Self::Staging => f.write_str("Staging"),
            Self::Production => f.write_str("Production"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Immutable process configuration, shared with the router behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port bound on both `0.0.0.0` and `::`.
    pub port: u16,
    pub environment: Environment,
    /// Host names containing this suffix are treated as overlay-network names.
    pub overlay_suffix: String,
    /// Tailnet appended to the short host name when probing for an overlay name.
    pub overlay_tailnet: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::default(),
            overlay_suffix: DEFAULT_OVERLAY_SUFFIX.to_string(),
            overlay_tailnet: DEFAULT_OVERLAY_TAILNET.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: "PORT",
                    value: raw.clone(),
                })?,
            None => defaults.port,
        };

        let environment = lookup("APP_ENVIRONMENT")
            .map(|name| Environment::parse(&name))
            .unwrap_or(defaults.environment);

        Ok(Self {
            port,
            environment,
            overlay_suffix: lookup("OVERLAY_DOMAIN_SUFFIX").unwrap_or(defaults.overlay_suffix),
            overlay_tailnet: lookup("OVERLAY_TAILNET").unwrap_or(defaults.overlay_tailnet),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5207);
        assert!(!config.environment.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("APP_ENVIRONMENT", "development"),
            ("OVERLAY_DOMAIN_SUFFIX", ".example.net"),
            ("OVERLAY_TAILNET", "corp.example.net"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.overlay_suffix, ".example.net");
        assert_eq!(config.overlay_tailnet, "corp.example.net");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "70000"));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_environment_names() {
        assert_eq!(Environment::parse("Development"), Environment::Development);
        assert_eq!(Environment::parse("STAGING"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
        assert_eq!(
            Environment::parse("Testing"),
            Environment::Custom("Testing".to_string())
        );
        assert_eq!(Environment::parse("Testing").to_string(), "Testing");
    }
}
