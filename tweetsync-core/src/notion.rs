use anyhow::{bail, Context, Result};
use log::debug;
use serde_json::{json, Value};

use crate::post::Post;

pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects rich-text segments longer than this many characters.
pub const RICH_TEXT_LIMIT: usize = 2000;

pub const ID_PROPERTY: &str = "ID";
pub const DATE_PROPERTY: &str = "Date";
pub const ORIGINAL_TEXT_PROPERTY: &str = "Original Text";
pub const FILTERED_TEXT_PROPERTY: &str = "Filtered Text";

/// The two destination operations the upsert stage relies on.
pub trait DestinationTable {
    /// Rows of `table_id` matching a Notion database `filter` object.
    fn query(&self, table_id: &str, filter: &Value) -> Result<Vec<Value>>;

    /// Inserts one row built from `properties`, returning the created page.
    fn create_row(&self, table_id: &str, properties: Value) -> Result<Value>;
}

pub struct NotionClient {
    api_key: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: NOTION_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("notion: POST {}", url);

        let response = attohttpc::post(&url)
            .bearer_auth(self.api_key.as_str())
            .header("Notion-Version", NOTION_VERSION)
            .json(body)?
            .send()
            .with_context(|| format!("Failed to reach Notion at {}", url))?;

        if !response.is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("Notion API returned {} for {}: {}", status, path, body);
        }

        response.json().context("Failed to parse Notion response")
    }
}

impl DestinationTable for NotionClient {
    fn query(&self, table_id: &str, filter: &Value) -> Result<Vec<Value>> {
        let response = self.post(
            &format!("/databases/{}/query", table_id),
            &json!({ "filter": filter }),
        )?;

        let results = response
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(results)
    }

    fn create_row(&self, table_id: &str, properties: Value) -> Result<Value> {
        self.post(
            "/pages",
            &json!({
                "parent": { "type": "database_id", "database_id": table_id },
                "properties": properties,
            }),
        )
    }
}

/// Database filter selecting rows whose `ID` title equals `post_id`.
pub fn id_filter(post_id: &str) -> Value {
    json!({
        "property": ID_PROPERTY,
        "title": { "equals": post_id },
    })
}

/// Splits `content` into Notion rich-text segments of at most [`RICH_TEXT_LIMIT`] characters.
pub fn rich_text(content: &str) -> Vec<Value> {
    let chars: Vec<char> = content.chars().collect();
    if chars.is_empty() {
        return vec![json!({ "text": { "content": "" } })];
    }

    chars
        .chunks(RICH_TEXT_LIMIT)
        .map(|chunk| json!({ "text": { "content": chunk.iter().collect::<String>() } }))
        .collect()
}

/// The four-column row written for a post.
pub fn post_properties(post: &Post) -> Value {
    json!({
        ID_PROPERTY: { "title": [{ "text": { "content": post.id } }] },
        DATE_PROPERTY: { "date": { "start": post.created_at_iso() } },
        ORIGINAL_TEXT_PROPERTY: { "rich_text": rich_text(&post.full_text) },
        FILTERED_TEXT_PROPERTY: { "rich_text": rich_text(&post.filtered_text) },
    })
}

/// Plain-text title of a row's `ID` property, as stored by [`post_properties`]
/// or returned by the Notion API.
pub fn row_id(row: &Value) -> Option<String> {
    let props = row.get("properties").unwrap_or(row);
    let segments = props.get(ID_PROPERTY)?.get("title")?.as_array()?;

    let text = segments
        .iter()
        .filter_map(|segment| {
            segment
                .get("plain_text")
                .or_else(|| segment.get("text").and_then(|t| t.get("content")))
                .and_then(Value::as_str)
        })
        .collect::<String>();
    Some(text)
}
