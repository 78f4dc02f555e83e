//! Document store
//!
//! Owns the article and the editing session state. Readers go through
//! [`ArticleReader`], commands through [`ArticleWriter`].

pub mod document_store;
pub mod selectors;
pub mod traits;

pub use document_store::DocumentStore;
pub use selectors::{component_options, content_summary, ComponentOption, ContentSummary};
pub use traits::{ArticleReader, ArticleWriter};
