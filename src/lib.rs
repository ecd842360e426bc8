//! Bobaedream best-posts service.
//!
//! Fetches the mobile "best posts" board, pulls title, author, time and
//! counters out of each entry's link text, and serves the result as JSON
//! next to a small HTML page.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod best;
pub mod config;
pub mod constants;
pub mod web;
