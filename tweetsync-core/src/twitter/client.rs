use anyhow::{bail, Context, Result};
use attohttpc::header::AUTHORIZATION;
use log::debug;

use super::oauth::{percent_encode, sign_request};
use crate::config::TwitterCredentials;
use crate::post::Status;
use crate::timeline::TimelineSource;

pub const USER_TIMELINE_URL: &str = "https://api.twitter.com/1.1/statuses/user_timeline.json";

/// Largest page `statuses/user_timeline` will return.
pub const PAGE_SIZE: usize = 200;

pub struct TwitterClient {
    credentials: TwitterCredentials,
    timeline_url: String,
}

impl TwitterClient {
    pub fn new(credentials: TwitterCredentials) -> Self {
        Self {
            credentials,
            timeline_url: USER_TIMELINE_URL.to_string(),
        }
    }

    /// Points the client at another `user_timeline` endpoint.
    pub fn with_timeline_url(mut self, url: impl Into<String>) -> Self {
        self.timeline_url = url.into();
        self
    }

    pub fn user_timeline_params(screen_name: &str, max_id: Option<u64>) -> Vec<(String, String)> {
        let mut params = vec![
            ("screen_name".to_string(), screen_name.to_string()),
            ("tweet_mode".to_string(), "extended".to_string()),
            ("count".to_string(), PAGE_SIZE.to_string()),
        ];
        if let Some(max_id) = max_id {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        params
    }

    /// Fetches one page of statuses, newest first, with ids at or below `max_id`.
    pub fn get_user_timeline(&self, screen_name: &str, max_id: Option<u64>) -> Result<Vec<Status>> {
        let params = Self::user_timeline_params(screen_name, max_id);
        let authorization = sign_request(&self.credentials, "GET", &self.timeline_url, &params)?;

        // The query is encoded here so the bytes on the wire are the ones that were signed.
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.timeline_url, query);

        debug!("get_user_timeline: screen_name={} max_id={:?}", screen_name, max_id);
        let response = attohttpc::get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .context("Failed to reach the Twitter API")?;

        if !response.is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("Twitter API returned {} for user_timeline: {}", status, body);
        }

        let statuses: Vec<Status> = response
            .json()
            .context("Failed to parse user_timeline response")?;
        debug!("get_user_timeline: received {} statuses", statuses.len());
        Ok(statuses)
    }
}

impl TimelineSource for TwitterClient {
    fn fetch_page(&self, account: &str, max_id: Option<u64>) -> Result<Vec<Status>> {
        self.get_user_timeline(account, max_id)
    }
}
