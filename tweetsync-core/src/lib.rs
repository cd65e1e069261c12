//! Fetch a Twitter account's timeline, keep the posts matching an optional
//! keyword, pull out their `prompt:` text and upsert them into a Notion database.

pub mod config;
pub mod export;
pub mod notion;
pub mod pipeline;
pub mod post;
pub mod prompt;
pub mod timeline;
pub mod twitter;
pub mod upsert;

#[cfg(test)]
mod testing;

pub use crate::config::{SyncConfig, TwitterCredentials, DEFAULT_DATABASE_ID, NOTION_API_KEY};
pub use crate::export::{save_to_csv, write_posts, CSV_HEADER};
pub use crate::notion::{post_properties, DestinationTable, NotionClient};
pub use crate::pipeline::{run, sync, SyncOutcome};
pub use crate::post::{Post, Status};
pub use crate::prompt::extract_prompt;
pub use crate::timeline::{fetch_filtered_posts, keyword_matches, Timeline, TimelineSource};
pub use crate::twitter::TwitterClient;
pub use crate::upsert::{find_existing_record, save_posts, UpsertReport};
