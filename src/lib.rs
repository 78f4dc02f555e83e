//! Scrolly Editor WASM Module
//!
//! Document model and editing state engine for scrolly articles: an article
//! is a sequence of pages, each page a sequence of frames laid out by a
//! template, each frame one component per template slot.

pub mod api;
pub mod config;
pub mod export;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::EditorConfig;
pub use models::*;
pub use store::{ArticleReader, ArticleWriter, DocumentStore};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (tests, hot reload) keeps the existing logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Scrolly Editor WASM module initialized");
}
