//! `ScrollyEditor`: the JavaScript handle on the document store
//!
//! One instance per editor tab. Selectors return plain objects; commands
//! take plain objects and wire names ("image", "left-right", "top") and
//! never throw for out-of-range indices.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, deserialize_optional, parse_name, serialize, validation_error};
use crate::config::EditorConfig;
use crate::export::{can_generate, GenerationMode};
use crate::models::{Component, ComponentType, LayoutTemplate, Page, Placeholder, Position};
use crate::services::persistence::{BrowserPersistence, PartialArticle};
use crate::services::upload::validate_upload;
use crate::services::AnimationCatalog;
use crate::store::{ArticleReader, ArticleWriter, DocumentStore};
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct ScrollyEditor {
    store: DocumentStore<BrowserPersistence>,
    config: EditorConfig,
    animations: AnimationCatalog,
}

#[wasm_bindgen]
impl ScrollyEditor {
    /// Create an editor hydrated from localStorage.
    ///
    /// `config` is an optional partial `EditorConfig`; `upload` is an
    /// optional `(payloadJson, articleId) => void` callback for remote saves.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, upload: Option<js_sys::Function>) -> Result<ScrollyEditor, JsValue> {
        let config: EditorConfig = deserialize_optional(config, "Invalid editor config")?.unwrap_or_default();
        wasm_info!("ScrollyEditor created (storage key '{}')", config.storage_key);

        let persistence = BrowserPersistence::new(&config.storage_key, upload);
        let store = DocumentStore::with_config(persistence, &config);
        let animations = AnimationCatalog::new(config.animation_fallback.clone());

        Ok(ScrollyEditor {
            store,
            config,
            animations,
        })
    }

    // ========================================================================
    // Selectors
    // ========================================================================

    #[wasm_bindgen(js_name = articleId)]
    pub fn article_id(&self) -> String {
        self.store.article_id().to_string()
    }

    #[wasm_bindgen(js_name = articleTitle)]
    pub fn article_title(&self) -> String {
        self.store.article_title().to_string()
    }

    pub fn article(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.article(), "Article serialization error")
    }

    pub fn pages(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.pages(), "Pages serialization error")
    }

    pub fn placeholders(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.placeholders(), "Placeholders serialization error")
    }

    #[wasm_bindgen(js_name = currentEditingId)]
    pub fn current_editing_id(&self) -> Option<String> {
        self.store.current_editing_id().map(str::to_string)
    }

    /// `{ pageIndex, frameIndex }` or `null`
    pub fn focus(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.focus(), "Focus serialization error")
    }

    #[wasm_bindgen(js_name = draftPage)]
    pub fn draft_page(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.draft_page(), "Draft page serialization error")
    }

    /// Reusable components, committed ones first, then `unsaved` (array or null)
    #[wasm_bindgen(js_name = componentOptions)]
    pub fn component_options(&self, unsaved: JsValue) -> Result<JsValue, JsValue> {
        let unsaved: Vec<Component> =
            deserialize_optional(unsaved, "Invalid unsaved components")?.unwrap_or_default();
        serialize(&self.store.component_options(&unsaved), "Component options serialization error")
    }

    #[wasm_bindgen(js_name = contentSummary)]
    pub fn content_summary(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.content_summary(), "Summary serialization error")
    }

    // ========================================================================
    // Article commands
    // ========================================================================

    #[wasm_bindgen(js_name = setArticleId)]
    pub fn set_article_id(&mut self, id: &str) {
        self.store.set_article_id(id);
    }

    #[wasm_bindgen(js_name = setArticleTitle)]
    pub fn set_article_title(&mut self, title: &str) {
        self.store.set_article_title(title);
    }

    #[wasm_bindgen(js_name = resetArticle)]
    pub fn reset_article(&mut self) {
        wasm_info!("resetArticle called");
        self.store.reset_article();
    }

    /// Replace the current article with a stored payload (the JSON string
    /// saved by the upload callback). `articleId` keys a payload that lacks one.
    #[wasm_bindgen(js_name = loadPayload)]
    pub fn load_payload(&mut self, payload: &str, article_id: &str) -> Result<(), JsValue> {
        let mut article: PartialArticle = serde_json::from_str(payload)
            .map_err(|e| validation_error(format!("Invalid article payload: {}", e)))?;
        if article.article_id.as_deref().map_or(true, str::is_empty) {
            article.article_id = Some(article_id.to_string());
        }

        wasm_info!("loadPayload: article {}", article_id);
        self.store.load_article(article);
        Ok(())
    }

    #[wasm_bindgen(js_name = setPage)]
    pub fn set_page(&mut self, index: i32, page: JsValue) -> Result<(), JsValue> {
        let page: Page = deserialize(page, "Invalid page")?;
        self.store.set_page(index as i64, page);
        Ok(())
    }

    #[wasm_bindgen(js_name = removePage)]
    pub fn remove_page(&mut self, id: &str) {
        wasm_log!("removePage: id={}", id);
        self.store.remove_page(id);
    }

    #[wasm_bindgen(js_name = setPlaceholder)]
    pub fn set_placeholder(&mut self, index: i32, data: JsValue) -> Result<(), JsValue> {
        let data: Placeholder = deserialize(data, "Invalid placeholder")?;
        self.store.set_placeholder(index as i64, data);
        Ok(())
    }

    #[wasm_bindgen(js_name = appendDefaultPlaceholder)]
    pub fn append_default_placeholder(&mut self) {
        self.store.append_default_placeholder();
    }

    #[wasm_bindgen(js_name = setCurrentEditingId)]
    pub fn set_current_editing_id(&mut self, id: Option<String>) {
        self.store.set_current_editing_id(id);
    }

    /// Focus the (page, frame) of `component`; `null` clears
    #[wasm_bindgen(js_name = setFocus)]
    pub fn set_focus(&mut self, component: JsValue) -> Result<(), JsValue> {
        let component: Option<Component> = deserialize_optional(component, "Invalid focus component")?;
        self.store.set_focus(component.as_ref());
        Ok(())
    }

    /// Record a hover; applied by `flushFocus` after the debounce delay
    #[wasm_bindgen(js_name = queueFocus)]
    pub fn queue_focus(&mut self, component: JsValue, now_ms: f64) -> Result<(), JsValue> {
        let component: Option<Component> = deserialize_optional(component, "Invalid focus component")?;
        self.store.queue_focus(component, now_ms);
        Ok(())
    }

    #[wasm_bindgen(js_name = flushFocus)]
    pub fn flush_focus(&mut self, now_ms: f64) -> bool {
        self.store.flush_focus(now_ms)
    }

    #[wasm_bindgen(js_name = focusDebounceMs)]
    pub fn focus_debounce_ms(&self) -> f64 {
        self.config.focus_debounce_ms
    }

    // ========================================================================
    // Page and component commands
    // ========================================================================

    #[wasm_bindgen(js_name = setPageLayout)]
    pub fn set_page_layout(&mut self, page_index: usize, template: &str) {
        self.store.set_page_layout_at(page_index, LayoutTemplate::parse(template));
    }

    #[wasm_bindgen(js_name = setPagePinnable)]
    pub fn set_page_pinnable(&mut self, page_index: usize, pinnable: bool) {
        self.store.set_page_pinnable_at(page_index, pinnable);
    }

    #[wasm_bindgen(js_name = appendFrame)]
    pub fn append_frame(&mut self, page_index: usize) {
        self.store.append_frame_at(page_index);
    }

    #[wasm_bindgen(js_name = removeFrame)]
    pub fn remove_frame(&mut self, page_index: usize, frame_index: usize) {
        self.store.remove_frame_at(page_index, frame_index);
    }

    #[wasm_bindgen(js_name = setComponent)]
    pub fn set_component(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        component: JsValue,
    ) -> Result<(), JsValue> {
        let component: Component = deserialize(component, "Invalid component")?;
        self.store
            .set_component_at(page_index, frame_index, component_index, component);
        Ok(())
    }

    #[wasm_bindgen(js_name = changeComponentType)]
    pub fn change_component_type(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        kind: &str,
    ) -> Result<(), JsValue> {
        let kind: ComponentType = parse_name(kind, "Unknown component type")?;
        self.store
            .change_component_type_at(page_index, frame_index, component_index, kind);
        Ok(())
    }

    #[wasm_bindgen(js_name = changeComponentPosition)]
    pub fn change_component_position(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        position: &str,
    ) -> Result<(), JsValue> {
        let position: Position = parse_name(position, "Unknown position")?;
        self.store
            .change_component_position_at(page_index, frame_index, component_index, position);
        Ok(())
    }

    #[wasm_bindgen(js_name = setComponentAnimation)]
    pub fn set_component_animation(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        animation: Option<String>,
    ) {
        if let Some(key) = animation.as_deref() {
            if !self.animations.contains(key) {
                wasm_warn!("Animation '{}' is not in the catalog, storing it anyway", key);
            }
        }
        self.store
            .set_component_animation_at(page_index, frame_index, component_index, animation);
    }

    // ========================================================================
    // Editing session
    // ========================================================================

    #[wasm_bindgen(js_name = commitPage)]
    pub fn commit_page(&mut self, page: JsValue) -> Result<(), JsValue> {
        let page: Page = deserialize(page, "Invalid page")?;
        self.store.commit_page(page);
        Ok(())
    }

    #[wasm_bindgen(js_name = cancelEditing)]
    pub fn cancel_editing(&mut self) {
        self.store.cancel_editing();
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Check a file against the allow-list for `kind`. Returns the upload
    /// request, or throws the inline validation message.
    #[wasm_bindgen(js_name = validateUpload)]
    pub fn validate_upload(&self, file_name: &str, kind: &str) -> Result<JsValue, JsValue> {
        let kind: ComponentType = parse_name(kind, "Unknown component type")?;
        let request = validate_upload(self.store.article_id(), file_name, kind)
            .map_err(|e| validation_error(e.to_string()))?;
        serialize(&request, "Upload request serialization error")
    }

    #[wasm_bindgen(js_name = canGenerate)]
    pub fn can_generate(&self) -> bool {
        can_generate(&self.store.article())
    }

    #[wasm_bindgen(js_name = generationRequest)]
    pub fn generation_request(&self) -> Result<JsValue, JsValue> {
        serialize(&self.store.generation_request(), "Generation request serialization error")
    }

    /// `is_download=true|false` query string for the generate endpoint
    #[wasm_bindgen(js_name = generationQuery)]
    pub fn generation_query(&self, download: bool) -> String {
        let mode = if download {
            GenerationMode::Download
        } else {
            GenerationMode::Preview
        };
        mode.query()
    }

    #[wasm_bindgen(js_name = animationOptions)]
    pub fn animation_options(&self) -> Result<JsValue, JsValue> {
        serialize(&self.animations.options(), "Animation options serialization error")
    }

    /// Replace the animation catalog from the service's JSON reply
    #[wasm_bindgen(js_name = loadAnimationCatalog)]
    pub fn load_animation_catalog(&mut self, body: &str) {
        self.animations = AnimationCatalog::from_response(body, &self.config.animation_fallback);
        wasm_log!("Animation catalog: {} options", self.animations.options().len());
    }
}

/// Layout template names in picker order
#[wasm_bindgen(js_name = layoutTemplates)]
pub fn layout_templates() -> Result<JsValue, JsValue> {
    serialize(&crate::models::LAYOUT_TEMPLATES, "Layout serialization error")
}

/// Slot positions of a layout template, in slot order
#[wasm_bindgen(js_name = slotsFor)]
pub fn slots_for(template: &str) -> Result<JsValue, JsValue> {
    serialize(
        &crate::models::slots_for(LayoutTemplate::parse(template)),
        "Slot serialization error",
    )
}

/// Inline embed snippet for a preview reply `{ id, url }`
#[wasm_bindgen(js_name = previewEmbedSnippet)]
pub fn preview_embed_snippet(response: JsValue) -> Result<String, JsValue> {
    let response: crate::export::PreviewResponse = deserialize(response, "Invalid preview response")?;
    Ok(response.embed_snippet())
}
