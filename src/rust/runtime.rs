use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::Once;

use env_logger::{Builder, Env};

use crate::artifact::ArtifactStore;
use crate::classifier::SUSPICIOUS_THRESHOLD;

static INIT: Once = Once::new();

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub host: String,
    pub port: u16,
    pub threshold: f64,
    pub artifact_dir: PathBuf,
    /// Fit on the built-in corpus when no artifact exists yet.
    pub train_if_missing: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            threshold: SUSPICIOUS_THRESHOLD,
            artifact_dir: ArtifactStore::get_default_dir(),
            train_if_missing: false,
        }
    }
}

impl RuntimeConfig {
    /// Resolves `host` (an IP literal or a name such as `localhost`) to the
    /// first matching listen address.
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No address found for host {:?}", self.host),
                )
            })
    }
}

/// Installs the global logger once. `RUST_LOG` overrides the `info` default.
pub fn ensure_logger_initialized() {
    INIT.call_once(|| {
        let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_initialization() {
        ensure_logger_initialized();
        ensure_logger_initialized(); // Second call should be fine
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.threshold, 0.7);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:5001");
    }

    #[test]
    fn test_hostname_resolves() {
        let config = RuntimeConfig {
            host: "localhost".into(),
            port: 5002,
            ..RuntimeConfig::default()
        };
        let addr = config.socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 5002);
    }

    #[test]
    fn test_invalid_host() {
        let config = RuntimeConfig {
            host: "not a host".into(),
            ..RuntimeConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
