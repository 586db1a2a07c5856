//! Request bodies and the status-paired response type

use crate::{Error, Result};
use ghissues_core::models::IssueState;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of `POST /issues`
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Body of `PATCH /issues/{number}`. Unset fields are left out of the
/// request so the service keeps their current values.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
}

impl IssueUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn state(state: IssueState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.state.is_none()
    }
}

/// Body of comment create/update requests
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody<'a> {
    pub body: &'a str,
}

/// Error document returned with non-2xx statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// Per-field details sent with validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    /// Set when the body was not a JSON error document
    #[serde(skip)]
    pub raw: Option<String>,
}

impl ApiFailure {
    pub(crate) fn from_body(text: &str) -> Self {
        match serde_json::from_str::<ApiFailure>(text) {
            Ok(failure) => failure,
            Err(_) => Self {
                message: String::new(),
                documentation_url: None,
                errors: None,
                raw: Some(text.to_string()),
            },
        }
    }

    /// The message, falling back to the raw body
    pub fn describe(&self) -> &str {
        if self.message.is_empty() {
            self.raw.as_deref().unwrap_or_default()
        } else {
            &self.message
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Record(T),
    Failure(ApiFailure),
}

/// A decoded payload together with the HTTP status that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub payload: Payload<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn record(&self) -> Option<&T> {
        match &self.payload {
            Payload::Record(record) => Some(record),
            Payload::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match &self.payload {
            Payload::Record(_) => None,
            Payload::Failure(failure) => Some(failure),
        }
    }

    /// Take the record, turning a failure status into an error
    pub fn into_record(self) -> Result<T> {
        match self.payload {
            Payload::Record(record) => Ok(record),
            Payload::Failure(failure) if self.status == StatusCode::NOT_FOUND => {
                Err(Error::NotFound(failure.describe().to_string()))
            }
            Payload::Failure(failure) => Err(Error::Api {
                status: self.status,
                message: failure.describe().to_string(),
            }),
        }
    }
}
