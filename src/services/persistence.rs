//! Persistence adapter boundary
//!
//! The store's only side effect. After every committed page, title or id
//! write the store hands a partial article to `save` (local copy) and
//! `upload` (remote copy keyed by article id). Both are fire-and-forget:
//! adapters log their own failures and never report back.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use super::errors::PersistenceError;
use crate::models::page::Page;

/// Subset of the article that changed in one write
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialArticle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<Page>>,
}

impl PartialArticle {
    pub fn with_article_id(article_id: &str) -> Self {
        Self {
            article_id: Some(article_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn with_pages(pages: &[Page]) -> Self {
        Self {
            pages: Some(pages.to_vec()),
            ..Default::default()
        }
    }

    /// Overlay the fields present in `other`
    pub fn merge(&mut self, other: PartialArticle) {
        if other.article_id.is_some() {
            self.article_id = other.article_id;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.pages.is_some() {
            self.pages = other.pages;
        }
    }
}

/// Where the store sends committed changes
pub trait PersistenceAdapter {
    /// Local persistence of the changed fields
    fn save(&mut self, partial: &PartialArticle);

    /// Remote persistence, keyed by article id
    fn upload(&mut self, partial: &PartialArticle);

    /// Called once at startup to hydrate the store
    fn load(&mut self) -> Option<PartialArticle>;

    /// Forget the local copy (article reset)
    fn clear(&mut self) {}
}

// ============================================================================
// In-memory adapter
// ============================================================================

/// Everything a [`MemoryPersistence`] has seen
#[derive(Clone, Debug, Default)]
pub struct MemoryLog {
    /// Merged view of every save, as the browser adapter would store it
    pub stored: Option<PartialArticle>,
    pub saves: Vec<PartialArticle>,
    pub uploads: Vec<PartialArticle>,
    pub loads: usize,
    pub clears: usize,
}

/// Adapter that keeps everything in memory. Clones share the same log, so
/// a test can keep a handle after moving one into the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryPersistence {
    log: Rc<RefCell<MemoryLog>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter whose `load` returns `stored`
    pub fn with_stored(stored: PartialArticle) -> Self {
        let persistence = Self::default();
        persistence.log.borrow_mut().stored = Some(stored);
        persistence
    }

    pub fn stored(&self) -> Option<PartialArticle> {
        self.log.borrow().stored.clone()
    }

    pub fn saves(&self) -> Vec<PartialArticle> {
        self.log.borrow().saves.clone()
    }

    pub fn uploads(&self) -> Vec<PartialArticle> {
        self.log.borrow().uploads.clone()
    }

    pub fn loads(&self) -> usize {
        self.log.borrow().loads
    }

    pub fn clears(&self) -> usize {
        self.log.borrow().clears
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn save(&mut self, partial: &PartialArticle) {
        let mut log = self.log.borrow_mut();
        log.stored.get_or_insert_with(PartialArticle::default).merge(partial.clone());
        log.saves.push(partial.clone());
    }

    fn upload(&mut self, partial: &PartialArticle) {
        self.log.borrow_mut().uploads.push(partial.clone());
    }

    fn load(&mut self) -> Option<PartialArticle> {
        let mut log = self.log.borrow_mut();
        log.loads += 1;
        log.stored.clone()
    }

    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.stored = None;
        log.clears += 1;
    }
}

// ============================================================================
// Browser adapter
// ============================================================================

/// Article sent to the remote copy: the full stored article when local
/// storage can be read, otherwise the partial itself. Local storage failing
/// never blocks the upload, and the partial's article id always wins.
fn remote_payload(
    stored: Result<Option<PartialArticle>, PersistenceError>,
    partial: &PartialArticle,
) -> PartialArticle {
    let mut article = match stored {
        Ok(Some(stored)) => stored,
        Ok(None) => PartialArticle::default(),
        Err(e) => {
            log::warn!("Uploading without local copy: {}", e);
            PartialArticle::default()
        }
    };
    article.merge(partial.clone());
    article
}

/// `localStorage` for the local copy; an optional JavaScript callback
/// `(payloadJson, articleId)` for the remote copy.
pub struct BrowserPersistence {
    storage_key: String,
    upload_callback: Option<js_sys::Function>,
}

impl BrowserPersistence {
    pub fn new(storage_key: &str, upload_callback: Option<js_sys::Function>) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            upload_callback,
        }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage disabled".to_string()))
    }

    fn read(&self) -> Result<Option<PartialArticle>, PersistenceError> {
        let raw = Self::storage()?
            .get_item(&self.storage_key)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    // Stored value is merged, not replaced: each save carries only the
    // fields that changed.
    fn write(&self, partial: &PartialArticle) -> Result<(), PersistenceError> {
        let mut merged = self.read().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable stored article: {}", e);
            None
        }).unwrap_or_default();
        merged.merge(partial.clone());

        let json = serde_json::to_string(&merged)?;
        Self::storage()?
            .set_item(&self.storage_key, &json)
            .map_err(|e| PersistenceError::WriteFailed(format!("{:?}", e)))
    }

    fn remove(&self) -> Result<(), PersistenceError> {
        Self::storage()?
            .remove_item(&self.storage_key)
            .map_err(|e| PersistenceError::WriteFailed(format!("{:?}", e)))
    }
}

impl PersistenceAdapter for BrowserPersistence {
    fn save(&mut self, partial: &PartialArticle) {
        if let Err(e) = self.write(partial) {
            log::error!("Failed to save article locally: {}", e);
        }
    }

    fn upload(&mut self, partial: &PartialArticle) {
        let Some(callback) = &self.upload_callback else {
            log::debug!("No upload callback registered, skipping remote save");
            return;
        };

        let article = remote_payload(self.read(), partial);

        let payload = match serde_json::to_string(&article) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to serialize article for upload: {}", e);
                return;
            }
        };
        let article_id = article.article_id.clone().unwrap_or_default();

        if let Err(e) = callback.call2(
            &JsValue::NULL,
            &JsValue::from_str(&payload),
            &JsValue::from_str(&article_id),
        ) {
            log::error!("Upload callback threw: {:?}", e);
        }
    }

    fn load(&mut self) -> Option<PartialArticle> {
        match self.read() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Ignoring stored article: {}", e);
                None
            }
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.remove() {
            log::error!("Failed to clear stored article: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlays_present_fields() {
        let mut stored = PartialArticle::with_article_id("a1");
        stored.merge(PartialArticle::with_title("Rivers"));
        stored.merge(PartialArticle::with_pages(&[]));

        assert_eq!(stored.article_id.as_deref(), Some("a1"));
        assert_eq!(stored.title.as_deref(), Some("Rivers"));
        assert_eq!(stored.pages, Some(Vec::new()));
    }

    #[test]
    fn test_memory_persistence_shares_log() {
        let handle = MemoryPersistence::new();
        let mut adapter = handle.clone();

        adapter.save(&PartialArticle::with_article_id("a1"));
        adapter.save(&PartialArticle::with_title("T"));
        adapter.upload(&PartialArticle::with_title("T"));

        assert_eq!(handle.saves().len(), 2);
        assert_eq!(handle.uploads().len(), 1);
        let stored = handle.stored().unwrap();
        assert_eq!(stored.article_id.as_deref(), Some("a1"));
        assert_eq!(stored.title.as_deref(), Some("T"));

        adapter.clear();
        assert!(handle.stored().is_none());
    }

    #[test]
    fn test_remote_payload_prefers_stored_article() {
        let mut stored = PartialArticle::with_article_id("a1");
        stored.merge(PartialArticle::with_title("Rivers"));

        let payload = remote_payload(Ok(Some(stored)), &PartialArticle::with_pages(&[]));
        assert_eq!(payload.title.as_deref(), Some("Rivers"));
        assert_eq!(payload.article_id.as_deref(), Some("a1"));
        assert_eq!(payload.pages, Some(Vec::new()));
    }

    #[test]
    fn test_remote_payload_survives_unreadable_storage() {
        let mut partial = PartialArticle::with_title("Rivers");
        partial.article_id = Some("a1".to_string());

        let payload = remote_payload(
            Err(PersistenceError::Unavailable("localStorage disabled".to_string())),
            &partial,
        );
        assert_eq!(payload, partial);

        let payload = remote_payload(Ok(None), &partial);
        assert_eq!(payload.article_id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_partial_wire_shape() {
        let json = serde_json::to_string(&PartialArticle::with_title("T")).unwrap();
        assert_eq!(json, r#"{"title":"T"}"#);
    }
}
