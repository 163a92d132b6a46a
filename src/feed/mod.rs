//! Status feed parsing.
//!
//! # Data Flow
//! ```text
//! raw feed bytes
//!     → parser.rs (pull-parse, collect channel/item/title in order)
//!     → first title, or FeedError::{Malformed, Empty}
//! ```
//!
//! # Design Decisions
//! - Pure function of the input bytes, no I/O
//! - Malformed documents and empty item lists are distinct errors
//! - Titles are returned verbatim (unescaped, never trimmed)

pub mod parser;

pub use parser::{item_titles, latest_item, FeedError};
