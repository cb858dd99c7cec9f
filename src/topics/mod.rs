// Topic classification — keyword taxonomy and deterministic matcher.

mod builtin;
pub mod error;
pub mod input;
pub mod keyword;
pub mod taxonomy;
pub mod traits;

/// Label returned when no keyword matches.
pub const FALLBACK_TOPIC: &str = "otro";
