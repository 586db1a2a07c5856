//! Basic authentication and token storage

use crate::{Error, Result};

const KEYRING_SERVICE: &str = "ghissues";

/// Username + API token sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    api_token: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_token: api_token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Same user, different token. An empty token is sent as-is.
    pub fn with_token(&self, api_token: impl Into<String>) -> Self {
        Self::new(self.username.clone(), api_token)
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

/// API token kept in the OS keyring, one entry per username.
pub struct TokenStore {
    entry: keyring::Entry,
}

impl TokenStore {
    pub fn new(username: &str) -> Result<Self> {
        if username.trim().is_empty() {
            return Err(Error::Auth(
                "A username is required to look up a token".to_string(),
            ));
        }
        Ok(Self {
            entry: keyring::Entry::new(KEYRING_SERVICE, username)?,
        })
    }

    pub fn load(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        self.entry.set_password(token)?;
        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Pick the token for `username`: the configured one if set, else the
/// keyring entry.
pub fn resolve_token(username: &str, configured: Option<&str>) -> Result<String> {
    if let Some(token) = configured {
        return Ok(token.to_string());
    }

    TokenStore::new(username)?.load()?.ok_or_else(|| {
        Error::Auth(format!(
            "No token for {}: set GHISSUES_TOKEN or run `ghissues auth login`",
            username
        ))
    })
}
