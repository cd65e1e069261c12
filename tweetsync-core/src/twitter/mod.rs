pub mod client;
pub mod oauth;

pub use client::{TwitterClient, PAGE_SIZE, USER_TIMELINE_URL};
