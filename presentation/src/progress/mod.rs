//! Live progress while a session runs.

pub mod reporter;
