//! Logging infrastructure: session transcript observers.
//!
//! - [`TracingEventLogger`]: writes every workflow event through `tracing`,
//!   so it lands in the daily-rotating log file installed by the binary.
//! - [`JsonlEventLogger`]: machine-readable JSON Lines copy of the same
//!   events.

mod jsonl_logger;
mod tracing_logger;

pub use jsonl_logger::JsonlEventLogger;
pub use tracing_logger::{TRANSCRIPT_TARGET, TracingEventLogger};
