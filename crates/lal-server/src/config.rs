use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use lal_chaincode::DispatchMode;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Top-level configuration, usually read from `lal.toml`.
///
/// Every section is optional; missing values take their defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub logging: LoggingConfig,
    pub chaincode: ChaincodeConfig,
    pub ledger: LedgerConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7051)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `info` or `lal_chaincode=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeConfig {
    /// Reject unknown operation names instead of treating them as status updates.
    pub strict_dispatch: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Snapshot file to restore at startup and rewrite after each transaction.
    pub snapshot: Option<PathBuf>,
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(contents: &str) -> ServerResult<Self> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file absent, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        if self.chaincode.strict_dispatch {
            DispatchMode::Strict
        } else {
            DispatchMode::Legacy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.server.bind_addr, "127.0.0.1:7051".parse::<SocketAddr>().unwrap());
        assert_eq!(c.logging.level, "info");
        assert!(!c.logging.json);
        assert_eq!(c.dispatch_mode(), DispatchMode::Legacy);
        assert!(c.ledger.snapshot.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            [chaincode]
            strict_dispatch = true

            [ledger]
            snapshot = "state/ledger.json"
            "#,
        )
        .unwrap();
        assert_eq!(c.dispatch_mode(), DispatchMode::Strict);
        assert_eq!(c.ledger.snapshot, Some(PathBuf::from("state/ledger.json")));
        assert_eq!(c.logging.level, "info");
        assert_eq!(c.server.bind_addr.port(), 7051);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("[server]\nbind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = ServerConfig::load(&dir.path().join("lal.toml")).unwrap();
        assert_eq!(c.logging.level, "info");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lal.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"0.0.0.0:8080\"\n[logging]\nlevel = \"debug\"\njson = true\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.server.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.logging.level, "debug");
        assert!(c.logging.json);
    }
}
