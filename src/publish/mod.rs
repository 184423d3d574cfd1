//! Publication of rendered posts.
//!
//! Three submodules cover the outbound half of the pipeline:
//!
//! - [`identity`] - deterministic 10-hex-char entry identifiers
//! - [`render`] - fixed-template HTML rendering with output escaping
//! - [`writer`] - output directory handling and post persistence
//!
//! The existence of `<output_dir>/<id>.html` is the only record that an
//! entry was ever published; there is no separate ledger.

mod identity;
mod render;
mod writer;

pub use identity::entry_id;
pub use render::{render_post, PostContext, DEFAULT_TEMPLATE};
pub use writer::{is_published, post_path, prepare_dir, write_post};
