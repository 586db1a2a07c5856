//! ghissues
//!
//! Command line front end for the repository issues API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ghissues_client::{resolve_token, BasicAuth, IssuesClient, TokenStore};
use ghissues_core::models::{Config, IssueState};
use ghissues_core::storage::{init_config_dir, ConfigStorage};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ghissues")]
#[command(about = "ghissues - issues, comments and labels over the REST API", long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Repository owner
    #[arg(long)]
    owner: Option<String>,

    /// Repository name
    #[arg(long)]
    repo: Option<String>,

    /// Username for basic authentication
    #[arg(long)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with issues
    #[command(subcommand)]
    Issues(IssueCommand),

    /// List labels on an issue
    Labels { number: u64 },

    /// Work with issue comments
    #[command(subcommand)]
    Comments(CommentCommand),

    /// Manage the API token in the OS keyring
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Show or write the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum IssueCommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    Get {
        number: u64,
    },
    Update {
        number: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        state: Option<IssueState>,
    },
    Close {
        number: u64,
    },
}

#[derive(Subcommand, Debug)]
enum CommentCommand {
    /// List comments on an issue
    List { number: u64 },
    /// Add a comment to an issue
    Create {
        number: u64,
        #[arg(long)]
        body: String,
    },
    Get {
        id: u64,
    },
    Update {
        id: u64,
        #[arg(long)]
        body: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Store a token for the configured user
    Login {
        #[arg(long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    Show,
    /// Write the current settings (including --owner/--repo/--user) to disk
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(&args.log_level)
        .init();

    let storage = match &args.config {
        Some(path) => ConfigStorage::at_path(path.clone()),
        None => ConfigStorage::new(init_config_dir()?),
    };
    let mut config = storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;
    config.apply_env();
    apply_args(&mut config, &args);
    config.validate()?;
    tracing::debug!("Config loaded from {}", storage.path().display());

    match args.command {
        Command::Issues(cmd) => {
            let client = connect(&config)?;
            match cmd {
                IssueCommand::List => commands::list_issues(&client).await,
                IssueCommand::Create { title, body } => {
                    commands::create_issue(&client, &title, &body).await
                }
                IssueCommand::Get { number } => commands::get_issue(&client, number).await,
                IssueCommand::Update {
                    number,
                    title,
                    body,
                    state,
                } => commands::update_issue(&client, number, title, body, state).await,
                IssueCommand::Close { number } => commands::close_issue(&client, number).await,
            }
        }
        Command::Labels { number } => commands::list_labels(&connect(&config)?, number).await,
        Command::Comments(cmd) => {
            let client = connect(&config)?;
            match cmd {
                CommentCommand::List { number } => commands::list_comments(&client, number).await,
                CommentCommand::Create { number, body } => {
                    commands::create_comment(&client, number, &body).await
                }
                CommentCommand::Get { id } => commands::get_comment(&client, id).await,
                CommentCommand::Update { id, body } => {
                    commands::update_comment(&client, id, &body).await
                }
                CommentCommand::Delete { id } => commands::delete_comment(&client, id).await,
            }
        }
        Command::Auth(cmd) => {
            config.auth.validate()?;
            let store = TokenStore::new(&config.auth.username)?;
            match cmd {
                AuthCommand::Login { token } => {
                    store.save(&token)?;
                    eprintln!("Token stored for {}", config.auth.username);
                }
                AuthCommand::Logout => {
                    store.delete()?;
                    eprintln!("Token removed for {}", config.auth.username);
                }
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => commands::show_config(&config),
        Command::Config(ConfigCommand::Init) => {
            storage.save(&config)?;
            eprintln!("Config written to {}", storage.path().display());
            Ok(())
        }
    }
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(owner) = &args.owner {
        config.repo.owner = owner.clone();
    }
    if let Some(repo) = &args.repo {
        config.repo.name = repo.clone();
    }
    if let Some(user) = &args.user {
        config.auth.username = user.clone();
    }
}

/// Build a client, taking the token from config/env first and the keyring
/// second.
fn connect(config: &Config) -> Result<IssuesClient> {
    config.validate_target()?;

    let token = resolve_token(&config.auth.username, config.auth.token.as_deref())?;
    let auth = BasicAuth::new(config.auth.username.clone(), token);
    Ok(IssuesClient::from_config(config, auth)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "ghissues",
            "--owner",
            "octocat",
            "issues",
            "update",
            "5",
            "--state",
            "closed",
        ])
        .unwrap();

        match args.command {
            Command::Issues(IssueCommand::Update { number, state, .. }) => {
                assert_eq!(number, 5);
                assert_eq!(state, Some(IssueState::Closed));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_state_rejected() {
        let result =
            Args::try_parse_from(["ghissues", "issues", "update", "5", "--state", "merged"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_args_overrides() {
        let args = Args::try_parse_from([
            "ghissues", "--owner", "o", "--repo", "r", "--user", "u", "config", "show",
        ])
        .unwrap();

        let mut config = Config::default();
        apply_args(&mut config, &args);
        assert_eq!(config.repo.owner, "o");
        assert_eq!(config.repo.name, "r");
        assert_eq!(config.auth.username, "u");
    }

    #[test]
    fn test_connect_with_config_token() {
        let mut config = Config::default();
        config.repo.owner = "octocat".to_string();
        config.repo.name = "hello-world".to_string();
        config.auth.username = "octocat".to_string();
        config.auth.token = Some("secret".to_string());

        let client = connect(&config).unwrap();
        assert_eq!(client.auth().username(), "octocat");
    }
}
