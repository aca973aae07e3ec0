//! WebAssembly bindings for the emulator.
//!
//! This module provides JavaScript-callable interfaces to a ready-made
//! machine (RAM, ACIA and ROM) for browser-based execution.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator6502;
