use anyhow::Result;
use log::{debug, info};
use serde_json::Value;

use crate::notion::{id_filter, post_properties, DestinationTable};
use crate::post::Post;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// First row of `table_id` whose `ID` equals `post_id`, if any.
pub fn find_existing_record<T: DestinationTable + ?Sized>(
    table: &T,
    table_id: &str,
    post_id: &str,
) -> Result<Option<Value>> {
    let rows = table.query(table_id, &id_filter(post_id))?;
    Ok(rows.into_iter().next())
}

/// Inserts every post whose id is not already present, in order.
///
/// The existence check and the insert are separate calls, so two runs racing
/// on the same table can still both insert a given post.
pub fn save_posts<T: DestinationTable + ?Sized>(
    table: &T,
    table_id: &str,
    posts: &[Post],
) -> Result<UpsertReport> {
    println!("Saving tweets to Notion database...");
    let mut report = UpsertReport::default();

    for post in posts {
        if find_existing_record(table, table_id, &post.id)?.is_some() {
            println!(
                "Tweet with ID {} already exists in Notion database. Skipping.",
                post.id
            );
            report.skipped += 1;
            continue;
        }

        table.create_row(table_id, post_properties(post))?;
        debug!("save_posts: inserted {}", post.id);
        report.inserted += 1;
    }

    println!("Tweets saved to Notion database.");
    info!(
        "save_posts: {} inserted, {} skipped",
        report.inserted, report.skipped
    );
    Ok(report)
}
