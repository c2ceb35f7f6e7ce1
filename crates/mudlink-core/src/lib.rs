#![forbid(unsafe_code)]

//! `mudlink-core` is the host-independent half of the mudlink browser client.
//!
//! Design goals:
//! - **Host-driven**: the embedding frontend pushes socket events and clicks
//!   in; the core answers with [`UiCommand`]s and never blocks.
//! - **No DOM**: nothing here depends on `wasm-bindgen`, so every behavior is
//!   testable with plain `cargo test`.
//! - **One active prompt**: the prompt slot is an explicit `Option`, not a
//!   lookup by element id.
//!
//! The `mudlink-web` crate wraps this with a `web_sys::WebSocket` and real
//! DOM elements.

pub mod client;
pub mod config;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod prompt;
pub mod protocol;
pub mod scroll;
pub mod transcript;

pub use client::{ClientCore, UiCommand};
pub use config::{ClientConfig, DomIds};
pub use connection::{ConnectionState, ConnectionStatus};
pub use error::{ClientError, ConfigError, PromptError, ProtocolError, Result};
pub use prompt::{FieldKind, FormField, PromptButton, PromptId, PromptView};
pub use protocol::{InboundMessage, InputValue, InputValues, OutboundAction};
pub use scroll::{FollowDecision, ScrollMetrics};
