#![forbid(unsafe_code)]

//! Small decoding helpers between DOM values and core types.
//!
//! Kept free of `wasm-bindgen` so they run under native `cargo test`.

use mudlink_core::{PromptButton, PromptId};
use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Decode the `data-prompt-id` / `data-prompt-action` pair of a clicked
/// button.
#[must_use]
pub fn prompt_target(
    id_attr: Option<&str>,
    action_attr: Option<&str>,
) -> Option<(PromptId, PromptButton)> {
    let id = id_attr?.trim().parse::<u64>().ok()?;
    let button = PromptButton::from_action_name(action_attr?.trim())?;
    Some((PromptId::new(id), button))
}

/// Console method used for a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

#[must_use]
pub fn console_method(level: Level) -> ConsoleMethod {
    match level {
        Level::ERROR => ConsoleMethod::Error,
        Level::WARN => ConsoleMethod::Warn,
        Level::INFO => ConsoleMethod::Info,
        _ => ConsoleMethod::Debug,
    }
}

/// Parse a configured log level, defaulting to `INFO` on garbage.
#[must_use]
pub fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}
