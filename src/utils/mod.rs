//! Utility functions and helpers

pub mod time;

pub use time::{hours_to_millis, now_millis};
