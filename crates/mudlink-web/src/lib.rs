#![forbid(unsafe_code)]

//! Browser frontend for the mudlink client.
//!
//! This crate provides [`start_client`], a `wasm-bindgen` export that opens
//! the game WebSocket and drives `mudlink_core::ClientCore` from DOM and
//! socket events. A page embeds it like so:
//!
//! ```html
//! <script type="module">
//!   import init, { start_client } from "./pkg/mudlink_web.js";
//!   window.onload = async () => { await init(); start_client(); };
//! </script>
//! ```
//!
//! The page must contain `#stream-metabox` (scroll container), `#stream`
//! (transcript) and `#connection-status`; the ids can be overridden through
//! the config JSON.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::start_client;

// Attribute and log-level decoding is shared by the wasm glue and native tests.
pub mod host;
