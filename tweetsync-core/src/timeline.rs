use anyhow::Result;
use log::{debug, warn};
use std::collections::VecDeque;

use crate::post::{Post, Status};

/// Anything that can serve a user's timeline one page at a time, newest first.
/// `max_id` bounds the page to statuses with ids at or below it.
pub trait TimelineSource {
    fn fetch_page(&self, account: &str, max_id: Option<u64>) -> Result<Vec<Status>>;
}

/// Case-insensitive substring filter; an absent or empty keyword keeps everything.
pub fn keyword_matches(keyword: Option<&str>, text: &str) -> bool {
    match keyword {
        None => true,
        Some(k) if k.is_empty() => true,
        Some(k) => text.to_lowercase().contains(&k.to_lowercase()),
    }
}

/// Lazily walks an account's whole timeline, requesting pages only as the
/// iterator is advanced. Yields retained posts with their prompt text attached.
/// A fresh `Timeline` restarts from the newest post.
pub struct Timeline<'a, S: TimelineSource + ?Sized> {
    source: &'a S,
    account: String,
    keyword: Option<String>,
    buffer: VecDeque<Status>,
    max_id: Option<u64>,
    pages_fetched: usize,
    exhausted: bool,
}

impl<'a, S: TimelineSource + ?Sized> Timeline<'a, S> {
    pub fn new(source: &'a S, account: impl Into<String>, keyword: Option<&str>) -> Self {
        Self {
            source,
            account: account.into(),
            keyword: keyword.filter(|k| !k.is_empty()).map(str::to_string),
            buffer: VecDeque::new(),
            max_id: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_next_page(&mut self) -> Result<()> {
        let page = self.source.fetch_page(&self.account, self.max_id)?;
        self.pages_fetched += 1;
        debug!(
            "fetch_next_page: page {} for {} returned {} statuses",
            self.pages_fetched,
            self.account,
            page.len()
        );

        if page.is_empty() {
            self.exhausted = true;
            return Ok(());
        }

        // Next page starts just below the oldest id seen so far.
        let next_max_id = page
            .iter()
            .filter_map(Status::numeric_id)
            .min()
            .and_then(|oldest| oldest.checked_sub(1));

        match (next_max_id, self.max_id) {
            (None, _) => {
                warn!("Timeline page for {} has no usable ids, stopping pagination", self.account);
                self.exhausted = true;
            }
            (Some(next), Some(current)) if next >= current => {
                warn!("Timeline for {} did not advance past max_id {}, stopping", self.account, current);
                self.exhausted = true;
            }
            (Some(next), _) => self.max_id = Some(next),
        }

        self.buffer.extend(page);
        Ok(())
    }
}

impl<'a, S: TimelineSource + ?Sized> Iterator for Timeline<'a, S> {
    type Item = Result<Post>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(status) = self.buffer.pop_front() {
                if keyword_matches(self.keyword.as_deref(), &status.full_text) {
                    return Some(Ok(Post::from(status)));
                }
            }

            if self.exhausted {
                return None;
            }

            if let Err(e) = self.fetch_next_page() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
    }
}

/// Collects the retained posts of `account`, printing progress as it goes.
/// `limit` caps the number of retained posts and stops paging early.
pub fn fetch_filtered_posts<S: TimelineSource + ?Sized>(
    source: &S,
    account: &str,
    keyword: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<Post>> {
    match keyword.filter(|k| !k.is_empty()) {
        Some(k) => println!("Fetching tweets from {} containing '{}'...", account, k),
        None => println!("Fetching all tweets from {}...", account),
    }

    let timeline = Timeline::new(source, account, keyword);
    let posts = timeline
        .take(limit.unwrap_or(usize::MAX))
        .collect::<Result<Vec<_>>>()?;

    println!("Found {} tweets.", posts.len());
    Ok(posts)
}
