use anyhow::Result;
use log::{info, warn};

use crate::config::{SyncConfig, TwitterCredentials};
use crate::export::save_to_csv;
use crate::notion::{DestinationTable, NotionClient};
use crate::post::Post;
use crate::timeline::{fetch_filtered_posts, TimelineSource};
use crate::twitter::TwitterClient;
use crate::upsert::{save_posts, UpsertReport};

#[derive(Debug)]
pub struct SyncOutcome {
    pub posts: Vec<Post>,
    /// `None` when the upsert stage was disabled.
    pub upsert: Option<UpsertReport>,
}

/// Runs one sync against the live APIs.
pub fn run(config: &SyncConfig, credentials: TwitterCredentials) -> Result<SyncOutcome> {
    let twitter = TwitterClient::new(credentials);
    let notion = config.upsert_target().map(|(api_key, _)| NotionClient::new(api_key));

    sync(
        config,
        &twitter,
        notion.as_ref().map(|client| client as &dyn DestinationTable),
    )
}

/// Fetch, filter, then upsert into `destination` and optionally export to CSV.
/// The upsert only runs when `config` carries both destination credentials and a table id.
pub fn sync<S: TimelineSource + ?Sized>(
    config: &SyncConfig,
    source: &S,
    destination: Option<&dyn DestinationTable>,
) -> Result<SyncOutcome> {
    info!("sync: starting for {}", config.account_id);
    let posts = fetch_filtered_posts(
        source,
        &config.account_id,
        config.keyword.as_deref(),
        config.limit,
    )?;

    let upsert = match (destination, config.upsert_target()) {
        (Some(table), Some((_, table_id))) => Some(save_posts(table, table_id, &posts)?),
        (Some(_), None) => {
            warn!("sync: destination credentials or table id missing, skipping upsert");
            None
        }
        (None, _) => {
            info!("sync: no destination configured, skipping upsert");
            None
        }
    };

    if let Some(path) = &config.export_path {
        save_to_csv(&posts, path)?;
    }

    Ok(SyncOutcome { posts, upsert })
}
