//! Subcommand handlers

use anyhow::{bail, Result};
use ghissues_client::{ApiResponse, IssueUpdate, IssuesClient, Payload};
use ghissues_core::models::{Config, IssueState};
use serde::Serialize;

/// Print the status to stderr and the payload to stdout; fail on non-2xx.
fn report<T: Serialize>(response: ApiResponse<T>) -> Result<()> {
    eprintln!("{}", response.status);

    let output = match &response.payload {
        Payload::Record(record) => serde_json::to_string_pretty(record)?,
        Payload::Failure(failure) => match &failure.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_string_pretty(failure)?,
        },
    };
    println!("{}", output);

    if !response.is_success() {
        bail!("Request failed with status {}", response.status);
    }
    Ok(())
}

pub async fn list_issues(client: &IssuesClient) -> Result<()> {
    report(client.list_issues().await?)
}

pub async fn create_issue(client: &IssuesClient, title: &str, body: &str) -> Result<()> {
    report(client.create_issue(title, body).await?)
}

pub async fn get_issue(client: &IssuesClient, number: u64) -> Result<()> {
    report(client.get_issue(number).await?)
}

pub async fn update_issue(
    client: &IssuesClient,
    number: u64,
    title: Option<String>,
    body: Option<String>,
    state: Option<IssueState>,
) -> Result<()> {
    let update = IssueUpdate { title, body, state };
    if update.is_empty() {
        bail!("Nothing to update: pass --title, --body or --state");
    }
    report(client.update_issue(number, &update).await?)
}

pub async fn close_issue(client: &IssuesClient, number: u64) -> Result<()> {
    report(client.close_issue(number).await?)
}

pub async fn list_labels(client: &IssuesClient, number: u64) -> Result<()> {
    report(client.list_labels(number).await?)
}

pub async fn list_comments(client: &IssuesClient, number: u64) -> Result<()> {
    report(client.list_comments(number).await?)
}

pub async fn create_comment(client: &IssuesClient, number: u64, body: &str) -> Result<()> {
    report(client.create_comment(number, body).await?)
}

pub async fn get_comment(client: &IssuesClient, id: u64) -> Result<()> {
    report(client.get_comment(id).await?)
}

pub async fn update_comment(client: &IssuesClient, id: u64, body: &str) -> Result<()> {
    report(client.update_comment(id, body).await?)
}

pub async fn delete_comment(client: &IssuesClient, id: u64) -> Result<()> {
    let response = client.delete_comment(id).await?;
    if response.is_success() {
        eprintln!("{}", response.status);
        return Ok(());
    }
    report(response)
}

pub fn show_config(config: &Config) -> Result<()> {
    let mut shown = config.clone();
    if shown.auth.token.is_some() {
        shown.auth.token = Some("********".to_string());
    }
    println!("{}", serde_json::to_string_pretty(&shown)?);
    Ok(())
}
