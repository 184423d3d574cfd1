//! Configuration for a feedpress run.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields`
//! off), though we log a warning when the file contains potential typos.
//! The loaded value is immutable for the rest of the run and is passed into
//! the pipeline explicitly, so tests can inject their own.
use chrono::Offset;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::publish::DEFAULT_TEMPLATE;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level run configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title shown in the page header and footer of every post.
    pub site_title: String,

    /// Directory the rendered post files are written to.
    pub output_dir: PathBuf,

    /// How many of the newest entries per feed are considered each run.
    pub max_items_per_feed: usize,

    /// Ordered list of feed URLs to poll.
    pub feeds: Vec<String>,

    /// Fixed UTC offset (whole hours) for displayed timestamps.
    pub utc_offset_hours: i32,

    /// Maximum summary length in characters before an ellipsis is appended.
    pub summary_len: usize,

    /// Per-request timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with every feed request.
    pub user_agent: String,

    /// Full HTML template override. `None` uses the built-in template.
    pub template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_title: "Automated Blog".to_string(),
            output_dir: PathBuf::from("posts"),
            max_items_per_feed: 1,
            feeds: vec!["https://rss.itmedia.co.jp/rss/2.0/news_bursts.xml".to_string()],
            utc_offset_hours: 9,
            summary_len: 160,
            fetch_timeout_secs: 15,
            user_agent: "feedpress/0.1 (+rss bot)".to_string(),
            template: None,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    /// - Feed URLs that do not parse → dropped with a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading so a corrupted or runaway config
        // file cannot exhaust memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {} // Size is within limits, proceed
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "site_title",
                "output_dir",
                "max_items_per_feed",
                "feeds",
                "utc_offset_hours",
                "summary_len",
                "fetch_timeout_secs",
                "user_agent",
                "template",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = toml::from_str(&content)?;
        config.drop_invalid_feeds();
        tracing::info!(
            path = %path.display(),
            feeds = config.feeds.len(),
            output_dir = %config.output_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// The template text for this run: the configured override, or the
    /// built-in template.
    pub fn template_text(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The fixed timezone offset for displayed timestamps. An offset outside
    /// chrono's representable range falls back to UTC with a warning.
    pub fn utc_offset(&self) -> chrono::FixedOffset {
        match chrono::FixedOffset::east_opt(self.utc_offset_hours.saturating_mul(3600)) {
            Some(offset) => offset,
            None => {
                tracing::warn!(
                    utc_offset_hours = self.utc_offset_hours,
                    "Configured UTC offset out of range, falling back to UTC"
                );
                chrono::Utc.fix()
            }
        }
    }

    fn drop_invalid_feeds(&mut self) {
        self.feeds.retain(|feed| match Url::parse(feed) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(feed = %feed, error = %e, "Dropping feed with invalid URL");
                false
            }
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
