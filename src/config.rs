use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL. `DATABASE_URL` overrides this when set;
    /// absence of both is a fatal startup condition.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_ttl_hours: 24,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }

    /// Resolve the database connection string: environment first, config second.
    pub fn resolve_database_url(&self) -> Option<String> {
        std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.database_url.clone().filter(|s| !s.is_empty()))
    }

    /// Resolve the session signing secret: environment first, config second.
    pub fn resolve_jwt_secret(&self) -> Option<String> {
        std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.auth.jwt_secret.clone()).filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let auth = AuthConfig::default();
        assert!(auth.jwt_secret.is_empty());
        assert_eq!(auth.session_ttl_hours, 24);
    }

    #[test]
    fn test_config_parses_minimal_yaml() {
        let yaml = r#"
log_level: info
log_dir: ./logs
log_file: dashboard.log
use_json: false
rotation: never
enable_tracing: true
gateway:
  host: 127.0.0.1
  port: 3000
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.auth.session_ttl_hours, 24);
    }

    #[test]
    fn test_config_parses_database_url() {
        let yaml = r#"
log_level: debug
log_dir: ./logs
log_file: dashboard.log
use_json: true
rotation: daily
enable_tracing: false
gateway:
  host: 0.0.0.0
  port: 8080
database_url: postgres://localhost/acme
auth:
  jwt_secret: s3cret
  session_ttl_hours: 12
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/acme"));
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.session_ttl_hours, 12);
    }
}
