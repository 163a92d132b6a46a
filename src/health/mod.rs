//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health/
//!     → evaluator.rs (fetch status feed)
//!     → feed::latest_item (first item title)
//!     → "RESOLVED" in title? 204 : 500
//! ```
//!
//! # Design Decisions
//! - Health mirrors an upstream status feed, not this process
//! - No caching, hysteresis or debouncing; each request is evaluated alone
//! - Network, body, and parse failures all read as unhealthy

pub mod evaluator;

pub use evaluator::{health_handler, HealthSignal, StatusFeedProbe, RESOLUTION_MARKER};
