//! Documentation proxy subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → fragment.rs (pull the fragment, drop everything else)
//!     → handler.rs (docs URL + fragment, single upstream GET)
//!     → status + end-to-end headers committed to the client
//!     → copier.rs (32 KiB read/write loop, spawned task)
//!     → body.rs (channel-backed client body)
//! ```
//!
//! # Design Decisions
//! - One upstream request per inbound request, never retried
//! - The copy task owns the upstream response and drops it when done
//! - A failed copy aborts the client body; the status cannot change anymore

pub mod body;
pub mod copier;
pub mod fragment;
pub mod handler;

pub use copier::{copy_response, CopyError, COPY_BUFFER_SIZE};
pub use fragment::{upstream_url, Fragment, X_FRAGMENT};
pub use handler::{proxy_handler, DocsProxy};
