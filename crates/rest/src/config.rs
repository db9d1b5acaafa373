//! Server configuration.
//!
//! Supports programmatic construction, command line arguments, and
//! environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MOLAR_PORT` | 8080 | Server port |
//! | `MOLAR_HOST` | 127.0.0.1 | Host to bind |
//! | `MOLAR_LOG_LEVEL` | info | Log level |
//! | `MOLAR_PATIENT_DB` | data/patients | Patient document store directory |
//! | `MOLAR_RECORD_DB` | data/records.db | Clinical record database file |
//! | `MOLAR_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `MOLAR_ENABLE_CORS` | true | Enable CORS |
//! | `MOLAR_CORS_ORIGINS` | * | Allowed origins |
//! | `MOLAR_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `MOLAR_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `MOLAR_BASE_URL` | http://localhost:8080 | Base URL for Location headers |
//! | `MOLAR_SEED_DEMO_DATA` | true | Seed demo data into empty stores |

use clap::Parser;

/// Server configuration for the Molar HTTP API.
///
/// Construct from the environment with [`ServerConfig::from_env`], from
/// command line arguments with [`ServerConfig::parse`], or
/// programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "molar")]
#[command(about = "Molar dental records server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "MOLAR_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "MOLAR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MOLAR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Directory of the embedded patient document store.
    #[arg(long, env = "MOLAR_PATIENT_DB", default_value = "data/patients")]
    pub patient_db: String,

    /// Path of the clinical record database file (`:memory:` for an
    /// in-memory database).
    #[arg(long, env = "MOLAR_RECORD_DB", default_value = "data/records.db")]
    pub record_db: String,

    /// Request timeout in seconds.
    #[arg(long, env = "MOLAR_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "MOLAR_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "MOLAR_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "MOLAR_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "MOLAR_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Base URL for the server (used in Location headers).
    #[arg(long, env = "MOLAR_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Seed demo data into empty stores at startup.
    #[arg(long, env = "MOLAR_SEED_DEMO_DATA", default_value = "true")]
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            patient_db: "data/patients".to_string(),
            record_db: "data/records.db".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            seed_demo_data: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.patient_db.is_empty() {
            errors.push("Patient database path cannot be empty".to_string());
        }

        if self.record_db.is_empty() {
            errors.push("Record database path cannot be empty".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing: in-memory stores, no
    /// CORS, no demo data, a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            patient_db: String::new(),
            record_db: ":memory:".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            seed_demo_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_empty_store_paths() {
        let config = ServerConfig {
            patient_db: String::new(),
            record_db: String::new(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(!config.seed_demo_data);
        assert_eq!(config.record_db, ":memory:");
    }
}
