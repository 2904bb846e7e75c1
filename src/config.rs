//! Application configuration
//!
//! Loaded from a TOML file (default: ~/.config/stayhub/config.toml).
//! Every section and field has a default, so a partial file is fine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_port: default_api_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file path
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Full connection URL; overrides `path` when set
    #[serde(default)]
    pub url: Option<String>,
}

fn default_db_path() -> String {
    "./stayhub.db".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            url: None,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Security settings
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_hours: i64,
}

fn default_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string())
}

fn default_jwt_expiration() -> i64 {
    24
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiration_hours: default_jwt_expiration(),
        }
    }
}

/// Bootstrap admin account, created on first start when no users exist
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_email() -> String {
    "admin@stayhub.local".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

fn default_admin_password() -> String {
    "admin12345".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            name: default_admin_name(),
            password: default_admin_password(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Default config file location: `~/.config/stayhub/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stayhub")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
        assert!(cfg.database.connection_url().starts_with("sqlite://"));
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 3000

            [database]
            path = "/var/lib/stayhub/data.db"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 3000);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(
            cfg.database.connection_url(),
            "sqlite:///var/lib/stayhub/data.db?mode=rwc"
        );
    }

    #[test]
    fn explicit_url_wins_over_path() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            path = "./ignored.db"
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");
    }
}
