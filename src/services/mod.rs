//! External collaborator boundaries
//!
//! - `persistence`: save/upload/load hooks the store calls after each write
//! - `upload`: file extension allow-lists and upload request shapes
//! - `animation`: animation option catalog with a static fallback

pub mod animation;
pub mod errors;
pub mod persistence;
pub mod upload;

pub use animation::AnimationCatalog;
pub use errors::{PersistenceError, UploadError};
pub use persistence::{BrowserPersistence, MemoryPersistence, PartialArticle, PersistenceAdapter};
pub use upload::{validate_upload, UploadRequest, UploadResponse};
