use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed page size for listing endpoints
    pub page_size: usize,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret used when no JWKS URL is configured (dev/test mode)
    pub secret: String,
    /// Key id the local secret is registered under
    pub key_id: String,
    /// JWKS document URL of the identity provider; switches verification to RS256
    pub jwks_url: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_PAGE_SIZE") {
            self.api.page_size = v.parse().unwrap_or(self.api.page_size);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_SECRET") {
            self.auth.secret = v;
        }
        if let Ok(v) = env::var("AUTH_KEY_ID") {
            self.auth.key_id = v;
        }
        if let Ok(v) = env::var("AUTH_JWKS_URL") {
            self.auth.jwks_url = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("AUTH_ISSUER") {
            self.auth.issuer = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("AUTH_AUDIENCE") {
            self.auth.audience = if v.is_empty() { None } else { Some(v) };
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig { page_size: 10, enable_request_logging: true },
            auth: AuthConfig {
                secret: "dev-only-secret".to_string(),
                key_id: "local".to_string(),
                jwks_url: None,
                issuer: None,
                audience: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig { page_size: 10, enable_request_logging: true },
            auth: AuthConfig {
                secret: String::new(),
                key_id: "local".to_string(),
                jwks_url: Some("https://staging-idp.example.com/.well-known/jwks.json".to_string()),
                issuer: Some("https://staging-idp.example.com/".to_string()),
                audience: Some("campus".to_string()),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig { page_size: 10, enable_request_logging: false },
            auth: AuthConfig {
                secret: String::new(),
                key_id: "local".to_string(),
                jwks_url: Some("https://idp.example.com/.well-known/jwks.json".to_string()),
                issuer: Some("https://idp.example.com/".to_string()),
                audience: Some("campus".to_string()),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.page_size, 10);
        assert!(config.auth.jwks_url.is_none());
        assert!(!config.auth.secret.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.api.page_size, 10);
        assert!(config.auth.jwks_url.is_some());
    }
}
