//! feedpress: a batch RSS/Atom poller that publishes new entries as static
//! HTML pages.
//!
//! The whole program is one linear pipeline, run once per invocation:
//!
//! fetch → parse → normalize → dedupe → render → write
//!
//! Deduplication has no ledger of its own: a post file named by the entry's
//! 10-hex-character identifier either exists under the output directory or it
//! does not. Feeds are processed strictly in order; a feed that fails to
//! fetch or parse is reported and skipped, never aborting the run.

pub mod config;
pub mod feed;
pub mod pipeline;
pub mod publish;
pub mod util;
