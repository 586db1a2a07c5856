//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub api: ApiConfig,
    pub repo: RepoConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RepoConfig {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AuthConfig {
    pub username: String,
    /// Kept out of the file unless set explicitly; the keyring is preferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        Ok(())
    }

    /// Validate that the configuration names a repository and a user
    pub fn validate_target(&self) -> Result<()> {
        self.validate()?;
        self.repo.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Override fields from `GHISSUES_*` environment variables.
    ///
    /// Unset or empty variables leave the current value alone.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_value("GHISSUES_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = env_value("GHISSUES_OWNER") {
            self.repo.owner = v;
        }
        if let Some(v) = env_value("GHISSUES_REPO") {
            self.repo.name = v;
        }
        if let Some(v) = env_value("GHISSUES_USER") {
            self.auth.username = v;
        }
        if let Some(v) = env_value("GHISSUES_TOKEN") {
            self.auth.token = Some(v);
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            api: ApiConfig::default(),
            repo: RepoConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Validate API endpoint configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Validation(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Validation("User agent cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("ghissues/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RepoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::Validation("Repository owner cannot be empty".to_string()));
        }

        if self.name.trim().is_empty() {
            return Err(Error::Validation("Repository name cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation("Username cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn target_config() -> Config {
        Config {
            repo: RepoConfig {
                owner: "octocat".to_string(),
                name: "hello-world".to_string(),
            },
            auth: AuthConfig {
                username: "octocat".to_string(),
                token: None,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.auth.token.is_none());
        assert!(config.validate().is_ok());
        assert!(config.validate_target().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        let mut config = ApiConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "api.github.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:8080/".to_string();
        assert_eq!(config.base(), "http://localhost:8080");
        config.user_agent = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_target_validation() {
        let mut config = target_config();
        assert!(config.validate_target().is_ok());

        config.repo.name = String::new();
        assert!(config.validate_target().is_err());

        config.repo.name = "hello-world".to_string();
        config.auth.username = String::new();
        assert!(config.validate_target().is_err());
    }

    #[test]
    fn test_token_not_serialized_when_unset() {
        let json = serde_json::to_string(&target_config()).unwrap();
        assert!(!json.contains("token"));
    }

    #[test]
    #[serial]
    fn test_apply_env() {
        unsafe {
            std::env::set_var("GHISSUES_OWNER", "someone");
            std::env::set_var("GHISSUES_TOKEN", "secret");
            std::env::set_var("GHISSUES_REPO", "");
        }

        let mut config = target_config();
        config.apply_env();

        unsafe {
            std::env::remove_var("GHISSUES_OWNER");
            std::env::remove_var("GHISSUES_TOKEN");
            std::env::remove_var("GHISSUES_REPO");
        }

        assert_eq!(config.repo.owner, "someone");
        assert_eq!(config.repo.name, "hello-world");
        assert_eq!(config.auth.token.as_deref(), Some("secret"));
    }
}
