//! The top-level control loop: one sequential pass over the configured
//! feeds, publishing each new entry as a static post.
//!
//! Feeds are processed strictly in order, each to completion before the
//! next; entries within a feed likewise. A feed that fails to fetch, parse,
//! or write is reported as a value in its [`FeedReport`] and never aborts
//! the run.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use crate::config::Config;
use crate::feed::{fetch_feed, parse_feed, Entry, FetchError, ParseError};
use crate::publish::{entry_id, is_published, prepare_dir, render_post, write_post, PostContext};
use crate::util::summarize;

/// Why a feed was abandoned for this run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome for a single configured feed. A feed abandoned mid-way keeps the
/// count of posts it already created: those files are on disk and the final
/// summary must reflect them.
#[derive(Debug)]
pub struct FeedReport {
    pub url: String,
    /// Posts created for this feed before it finished or was abandoned.
    pub created: usize,
    /// The failure that abandoned the feed, if any.
    pub error: Option<FeedError>,
}

/// Aggregate result of one run.
#[derive(Debug)]
pub struct RunSummary {
    /// Total posts created across all feeds.
    pub created: usize,
    /// Per-feed outcomes, in configuration order.
    pub reports: Vec<FeedReport>,
}

/// Run the whole pipeline once.
///
/// Builds the HTTP client, ensures the output directory exists, then walks
/// the configured feeds in order. Only outer setup failures (client build,
/// directory creation) return `Err`; per-feed failures land in the
/// [`RunSummary`] reports.
pub async fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;
    prepare_dir(&config.output_dir)?;

    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    let mut created = 0;
    let mut reports = Vec::with_capacity(config.feeds.len());

    for url in &config.feeds {
        let (count, error) = publish_feed(config, &client, url, timeout).await;
        created += count;
        match &error {
            None => {
                tracing::info!(feed = %url, created = count, "Feed processed");
            }
            Some(e) => {
                tracing::warn!(feed = %url, created = count, error = %e, "Feed abandoned for this run");
            }
        }
        reports.push(FeedReport {
            url: url.clone(),
            created: count,
            error,
        });
    }

    Ok(RunSummary { created, reports })
}

/// Fetch one feed and publish its newest entries, capped at
/// `max_items_per_feed`. Returns the number of posts actually created and
/// the failure that abandoned the feed, if any; entries whose identifier
/// already has a post file are skipped silently. A write failure stops the
/// feed but never un-counts the posts already on disk.
async fn publish_feed(
    config: &Config,
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> (usize, Option<FeedError>) {
    let entries = match fetch_entries(config, client, url, timeout).await {
        Ok(entries) => entries,
        Err(e) => return (0, Some(e)),
    };

    let now = Utc::now().with_timezone(&config.utc_offset());
    let mut created = 0;

    for entry in entries {
        let id = entry_id(&entry.link, &entry.title);
        if is_published(&config.output_dir, &id) {
            tracing::debug!(id = %id, title = %entry.title, "Post exists, skipping");
            continue;
        }

        let summary = summarize(&entry.summary, config.summary_len);
        let html = render_post(
            config.template_text(),
            &PostContext {
                site: &config.site_title,
                title: &entry.title,
                summary: &summary,
                link: &entry.link,
                now,
            },
        );
        match write_post(&config.output_dir, &id, &html) {
            Ok(path) => {
                tracing::info!(id = %id, path = %path.display(), title = %entry.title, "Post created");
                created += 1;
            }
            Err(e) => return (created, Some(e.into())),
        }
    }

    (created, None)
}

async fn fetch_entries(
    config: &Config,
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<Entry>, FeedError> {
    let bytes = fetch_feed(client, url, timeout).await?;
    Ok(parse_feed(&bytes, config.max_items_per_feed)?)
}
