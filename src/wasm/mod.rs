//! WebAssembly bindings for the edu6502 simulator.
//!
//! Exposes a [`Session`](crate::Session) to JavaScript and routes `log`
//! records to the browser console.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub mod logger;

#[cfg(feature = "wasm")]
pub use api::Emulator6502;

#[cfg(feature = "wasm")]
pub use logger::init_logging;
