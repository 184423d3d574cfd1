//! Feed retrieval and parsing.
//!
//! Two submodules cover the inbound half of the pipeline:
//!
//! - [`fetcher`] - single-shot HTTP retrieval with a bounded timeout
//! - [`parser`] - dual-dialect (RSS `<item>` / Atom `<entry>`) extraction
//!
//! Both fail per feed: the pipeline reports the error and moves on to the
//! next configured feed.

mod fetcher;
mod parser;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_feed, Entry, ParseError};
