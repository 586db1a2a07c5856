//! ghissues client
//!
//! Client library for the repository issues REST API: issues, comments and
//! labels, authenticated with HTTP basic auth.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{resolve_token, BasicAuth, TokenStore};
pub use client::IssuesClient;
pub use error::{Error, Result};
pub use types::*;

pub use reqwest::StatusCode;
