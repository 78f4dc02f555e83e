//! Scrolly Editor WASM API
//!
//! The JavaScript-facing surface of the editor.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros and JsValue conversion helpers
//! - `editor`: the `ScrollyEditor` class wrapping the document store

pub mod helpers;
pub mod editor;

pub use editor::{layout_templates, preview_embed_snippet, slots_for, ScrollyEditor};
