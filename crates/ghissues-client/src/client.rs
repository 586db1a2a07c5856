//! HTTP client for the repository issues API

use crate::auth::BasicAuth;
use crate::types::{ApiFailure, ApiResponse, CommentBody, IssueUpdate, NewIssue, Payload};
use crate::Result;
use ghissues_core::models::{ApiConfig, Comment, Config, Issue, IssueState, Label};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Client bound to a single repository.
///
/// Every call returns the decoded payload paired with the observed status;
/// non-2xx statuses are not errors at this layer. Only transport failures
/// and 2xx bodies of the wrong shape surface as `Err`.
#[derive(Debug, Clone)]
pub struct IssuesClient {
    http: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    auth: BasicAuth,
}

impl IssuesClient {
    /// Create a client with the default user agent
    pub fn new(
        base_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        auth: BasicAuth,
    ) -> Result<Self> {
        let api = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        Self::build(&api, owner.into(), repo.into(), auth)
    }

    /// Create a client for the repository named in `config`
    pub fn from_config(config: &Config, auth: BasicAuth) -> Result<Self> {
        config.validate_target()?;
        Self::build(
            &config.api,
            config.repo.owner.clone(),
            config.repo.name.clone(),
            auth,
        )
    }

    fn build(api: &ApiConfig, owner: String, repo: String, auth: BasicAuth) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let http = reqwest::Client::builder()
            .user_agent(api.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: api.base().to_string(),
            owner,
            repo,
            auth,
        })
    }

    /// Same repository, different credentials
    pub fn with_auth(&self, auth: BasicAuth) -> Self {
        Self {
            auth,
            ..self.clone()
        }
    }

    pub fn auth(&self) -> &BasicAuth {
        &self.auth
    }

    // Issue methods

    /// List issues in the repository
    pub async fn list_issues(&self) -> Result<ApiResponse<Vec<Issue>>> {
        self.get(&self.issues_path("")).await
    }

    /// Create an issue. The title is not checked locally; an empty title
    /// comes back as a validation failure status.
    pub async fn create_issue(&self, title: &str, body: &str) -> Result<ApiResponse<Issue>> {
        self.send_json(Method::POST, &self.issues_path(""), &NewIssue { title, body })
            .await
    }

    /// Fetch an issue by number
    pub async fn get_issue(&self, number: u64) -> Result<ApiResponse<Issue>> {
        self.get(&self.issues_path(&format!("/{}", number))).await
    }

    /// Update the fields set in `update`
    pub async fn update_issue(
        &self,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<ApiResponse<Issue>> {
        self.send_json(
            Method::PATCH,
            &self.issues_path(&format!("/{}", number)),
            update,
        )
        .await
    }

    /// Close an issue
    pub async fn close_issue(&self, number: u64) -> Result<ApiResponse<Issue>> {
        self.update_issue(number, &IssueUpdate::state(IssueState::Closed))
            .await
    }

    // Label methods

    /// List labels on an issue
    pub async fn list_labels(&self, number: u64) -> Result<ApiResponse<Vec<Label>>> {
        self.get(&self.issues_path(&format!("/{}/labels", number)))
            .await
    }

    // Comment methods

    /// List comments on an issue
    pub async fn list_comments(&self, number: u64) -> Result<ApiResponse<Vec<Comment>>> {
        self.get(&self.issues_path(&format!("/{}/comments", number)))
            .await
    }

    /// Add a comment to an issue
    pub async fn create_comment(&self, number: u64, body: &str) -> Result<ApiResponse<Comment>> {
        self.send_json(
            Method::POST,
            &self.issues_path(&format!("/{}/comments", number)),
            &CommentBody { body },
        )
        .await
    }

    /// Fetch a comment by id
    pub async fn get_comment(&self, id: u64) -> Result<ApiResponse<Comment>> {
        self.get(&self.comment_path(id)).await
    }

    /// Replace a comment's body
    pub async fn update_comment(&self, id: u64, body: &str) -> Result<ApiResponse<Comment>> {
        self.send_json(Method::PATCH, &self.comment_path(id), &CommentBody { body })
            .await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, id: u64) -> Result<ApiResponse<()>> {
        let path = self.comment_path(id);
        let request = self.request(Method::DELETE, &path);
        self.execute(Method::DELETE, &path, request).await
    }

    fn issues_path(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/issues{}", self.owner, self.repo, suffix)
    }

    fn comment_path(&self, id: u64) -> String {
        self.issues_path(&format!("/comments/{}", id))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(AUTHORIZATION, self.auth.to_basic_auth())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let request = self.request(Method::GET, path);
        self.execute(Method::GET, path, request).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method.clone(), path).json(body);
        self.execute(method, path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(%method, path, status = status.as_u16(), "issues API request");

        let payload = if status.is_success() {
            // Empty bodies (204 No Content) decode as JSON null
            let body = if text.trim().is_empty() { "null" } else { text.as_str() };
            Payload::Record(serde_json::from_str(body)?)
        } else {
            Payload::Failure(ApiFailure::from_body(&text))
        };

        Ok(ApiResponse { status, payload })
    }
}
