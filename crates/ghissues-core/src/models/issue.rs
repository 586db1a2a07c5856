//! Issue data model

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An issue as returned by the issues API.
///
/// `id` is the service-wide identifier; `number` is the sequential key
/// within the repository and is what every issue endpoint is addressed by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: IssueState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl Issue {
    /// Check if the issue is open
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }

    /// Check if the issue is closed
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Body text, treating a null body as empty
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

impl IssueState {
    /// Wire name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            other => Err(Error::Validation(format!(
                "Invalid issue state '{}'. Must be one of: open, closed",
                other
            ))),
        }
    }
}
