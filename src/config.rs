//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `ADMIN_PASSWORD` | `admin` (logs a warning) |
//! | `SESSION_KEY` | random per start; at least 64 bytes when set |
//! | `SECURE_COOKIES` | `false`; set `true` when served over TLS |

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Minimum length of a session signing key, in bytes.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    InvalidPort(String),
    SessionKeyTooShort { len: usize },
    InvalidFlag { name: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(p) => write!(f, "PORT '{}' is not a valid port number", p),
            ConfigError::SessionKeyTooShort { len } => write!(
                f,
                "SESSION_KEY must be at least {} bytes (got {})",
                MIN_SESSION_KEY_LEN, len
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{} must be true or false (got '{}')", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    /// Signing key for session cookies; `None` means generate one at startup.
    pub session_key: Option<Vec<u8>>,
    /// Mark session cookies `Secure` (HTTPS only).
    pub secure_cookies: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => 8080,
        };
        let admin_password = lookup("ADMIN_PASSWORD").unwrap_or_else(|| {
            log::warn!("ADMIN_PASSWORD is not set, using the default; change it before exposing the server");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });
        let session_key = match lookup("SESSION_KEY") {
            Some(k) if k.len() < MIN_SESSION_KEY_LEN => {
                return Err(ConfigError::SessionKeyTooShort { len: k.len() })
            }
            Some(k) => Some(k.into_bytes()),
            None => None,
        };
        let secure_cookies = match lookup("SECURE_COOKIES") {
            Some(v) => parse_flag("SECURE_COOKIES", v)?,
            None => false,
        };
        Ok(Self {
            host,
            port,
            admin_password,
            session_key,
            secure_cookies,
        })
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.port, 8080);
        assert_eq!(c.admin_password, DEFAULT_ADMIN_PASSWORD);
        assert!(c.session_key.is_none());
        assert!(!c.secure_cookies);
    }

    #[test]
    fn secure_cookies_flag() {
        assert!(config(&[("SECURE_COOKIES", "true")]).unwrap().secure_cookies);
        assert!(config(&[("SECURE_COOKIES", " 1 ")]).unwrap().secure_cookies);
        assert!(!config(&[("SECURE_COOKIES", "off")]).unwrap().secure_cookies);
        assert_eq!(
            config(&[("SECURE_COOKIES", "maybe")]).unwrap_err(),
            ConfigError::InvalidFlag {
                name: "SECURE_COOKIES",
                value: "maybe".to_string()
            }
        );
    }

    #[test]
    fn reads_overrides() {
        let key = "k".repeat(64);
        let c = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("ADMIN_PASSWORD", "hunter22"),
            ("SESSION_KEY", &key),
        ])
        .unwrap();
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 9000);
        assert_eq!(c.admin_password, "hunter22");
        assert_eq!(c.session_key.as_deref(), Some(key.as_bytes()));
    }

    #[test]
    fn rejects_bad_port() {
        assert_eq!(
            config(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
    }

    #[test]
    fn rejects_short_session_key() {
        assert_eq!(
            config(&[("SESSION_KEY", "short")]).unwrap_err(),
            ConfigError::SessionKeyTooShort { len: 5 }
        );
    }
}
