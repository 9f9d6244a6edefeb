//! Review domain
//!
//! The review tool asks a model for JSON feedback, but nothing enforces the
//! schema. [`feedback::ReviewFeedback::parse_best_effort`] extracts whatever
//! structure is present and never fails; the raw text is always kept.

pub mod feedback;

pub use feedback::{ParsedReview, ReviewFeedback, SuggestedPatch};
