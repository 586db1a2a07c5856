pub mod comment;
pub mod config;
pub mod issue;
pub mod label;

pub use comment::Comment;
pub use config::{ApiConfig, AuthConfig, Config, RepoConfig};
pub use issue::{Issue, IssueState};
pub use label::Label;
