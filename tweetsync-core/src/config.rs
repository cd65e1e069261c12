use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Notion database written to when no other id is given.
pub const DEFAULT_DATABASE_ID: &str = "97cc22e911a34e439598792fd37dea63";

pub const TWITTER_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const TWITTER_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const TWITTER_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const NOTION_API_KEY: &str = "NOTION_API_KEY";

/// OAuth 1.0a user-context credentials for the timeline API.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl TwitterCredentials {
    pub fn from_env() -> Result<Self> {
        Ok(TwitterCredentials {
            consumer_key: required_env(TWITTER_CONSUMER_KEY)?,
            consumer_secret: required_env(TWITTER_CONSUMER_SECRET)?,
            access_token: required_env(TWITTER_ACCESS_TOKEN)?,
            access_token_secret: required_env(TWITTER_ACCESS_TOKEN_SECRET)?,
        })
    }
}

// Secrets stay out of debug output and logs.
impl fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Everything one sync run needs. The upsert stage only runs when both
/// `destination_credentials` and `destination_table_id` are set.
#[derive(Clone, Default)]
pub struct SyncConfig {
    pub account_id: String,
    pub keyword: Option<String>,
    pub destination_credentials: Option<String>,
    pub destination_table_id: Option<String>,
    pub export_path: Option<PathBuf>,
    pub limit: Option<usize>,
}

impl SyncConfig {
    pub fn new(account_id: impl Into<String>) -> Self {
        SyncConfig {
            account_id: account_id.into(),
            ..Default::default()
        }
    }

    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = non_empty(keyword);
        self
    }

    pub fn with_destination(mut self, credentials: Option<String>, table_id: Option<String>) -> Self {
        self.destination_credentials = non_empty(credentials);
        self.destination_table_id = non_empty(table_id);
        self
    }

    pub fn with_export_path(mut self, path: Option<PathBuf>) -> Self {
        self.export_path = path;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// `(api_key, table_id)` when the upsert stage is enabled.
    pub fn upsert_target(&self) -> Option<(&str, &str)> {
        match (&self.destination_credentials, &self.destination_table_id) {
            (Some(key), Some(table)) => Some((key.as_str(), table.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("account_id", &self.account_id)
            .field("keyword", &self.keyword)
            .field(
                "destination_credentials",
                &self.destination_credentials.as_ref().map(|_| "<redacted>"),
            )
            .field("destination_table_id", &self.destination_table_id)
            .field("export_path", &self.export_path)
            .field("limit", &self.limit)
            .finish()
    }
}

fn required_env(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("Environment variable {} is not set", name))?;
    if value.trim().is_empty() {
        anyhow::bail!("Environment variable {} is empty", name);
    }
    Ok(value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
