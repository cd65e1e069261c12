use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::post::Post;

pub const CSV_HEADER: [&str; 4] = ["id", "created_at", "original_text", "filtered_text"];

/// Writes the header plus one row per post as CSV.
///
/// `created_at` is RFC 3339 (`2023-01-01T12:00:00+00:00`), matching the Notion
/// `Date` column, not the space-separated `2023-01-01 12:00:00+00:00` form.
pub fn write_posts<W: Write>(writer: W, posts: &[Post]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for post in posts {
        let created_at = post.created_at_iso();
        csv.write_record([
            post.id.as_str(),
            created_at.as_str(),
            post.full_text.as_str(),
            post.filtered_text.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Exports posts to `path`, replacing any existing file.
pub fn save_to_csv(posts: &[Post], path: &Path) -> Result<()> {
    println!("Saving tweets to {}...", path.display());
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_posts(file, posts)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Tweets saved to {}.", path.display());
    Ok(())
}
