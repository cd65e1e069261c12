use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::prompt::extract_prompt;

/// Timestamp layout used by the v1.1 REST API, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A raw status from `statuses/user_timeline` requested with `tweet_mode=extended`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Status {
    pub id_str: String,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
    pub full_text: String,
}

impl Status {
    /// Numeric id used for `max_id` pagination.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id_str.parse().ok()
    }
}

/// A status that survived filtering, enriched with its prompt text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub full_text: String,
    pub filtered_text: String,
}

impl Post {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, full_text: impl Into<String>) -> Self {
        let full_text = full_text.into();
        let filtered_text = extract_prompt(&full_text);

        Self {
            id: id.into(),
            created_at,
            full_text,
            filtered_text,
        }
    }

    /// ISO-8601 form written to the `Date` column and the CSV export.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339()
    }
}

impl From<Status> for Post {
    fn from(status: Status) -> Self {
        Post::new(status.id_str, status.created_at, status.full_text)
    }
}

pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT)
        .with_context(|| format!("Failed to parse tweet timestamp '{}'", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

fn deserialize_created_at<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(serde::de::Error::custom)
}
