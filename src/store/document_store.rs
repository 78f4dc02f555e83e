//! The document store
//!
//! Single owner of the article being edited. All mutation goes through the
//! [`ArticleWriter`] commands below; each one runs to completion, leaves
//! every positional id renumbered, and pushes the changed fields to the
//! persistence adapter.

use uuid::Uuid;

use crate::config::EditorConfig;
use crate::export::{generation_request, GenerationRequest};
use crate::models::article::{placeholders_for, reindex, renumber_placeholders};
use crate::models::{
    create_page, Component, ComponentType, FocusDebouncer, FocusPointer, LayoutTemplate, Page,
    Placeholder, Position,
};
use crate::services::persistence::{PartialArticle, PersistenceAdapter};

use super::traits::{ArticleReader, ArticleWriter};

/// Editing state for one article
pub struct DocumentStore<P: PersistenceAdapter> {
    article_id: String,
    article_title: String,
    pages: Vec<Page>,
    placeholders: Vec<Placeholder>,
    current_editing_id: Option<String>,
    focus: Option<FocusPointer>,
    pending_focus: FocusDebouncer,
    persistence: P,
}

fn new_article_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parse a positional id ("0", "1", ...)
fn parse_index(id: &str) -> Option<usize> {
    id.trim().parse::<usize>().ok()
}

/// Clamp a caller index at 0. None when it does not fit in `usize`, which
/// callers treat as past the end.
fn clamp_index(index: i64) -> Option<usize> {
    usize::try_from(index.max(0)).ok()
}

impl<P: PersistenceAdapter> DocumentStore<P> {
    /// Store with default configuration, hydrated from `persistence`
    pub fn new(persistence: P) -> Self {
        Self::with_config(persistence, &EditorConfig::default())
    }

    /// Store hydrated from `persistence`. `load` is called exactly once.
    pub fn with_config(persistence: P, config: &EditorConfig) -> Self {
        let mut store = Self {
            article_id: String::new(),
            article_title: String::new(),
            pages: Vec::new(),
            placeholders: placeholders_for(0),
            current_editing_id: None,
            focus: None,
            pending_focus: FocusDebouncer::new(config.focus_debounce_ms),
            persistence,
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        let loaded = self.persistence.load().unwrap_or_default();

        self.article_title = loaded.title.unwrap_or_default();
        self.pages = loaded.pages.unwrap_or_default();
        for page in &mut self.pages {
            page.normalize();
        }
        reindex(&mut self.pages);
        self.placeholders = placeholders_for(self.pages.len());

        match loaded.article_id.filter(|id| !id.is_empty()) {
            Some(id) => self.article_id = id,
            None => {
                self.article_id = new_article_id();
                log::info!("Starting new article {}", self.article_id);
                self.persist(PartialArticle::with_article_id(&self.article_id));
            }
        }

        log::info!(
            "Hydrated article {} with {} pages",
            self.article_id,
            self.pages.len()
        );
    }

    /// Borrow the persistence adapter
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Serialized article in the shape the website generator expects
    pub fn generation_request(&self) -> GenerationRequest {
        generation_request(&self.article())
    }

    /// Push a change to the adapter. Every partial carries the article id so
    /// the remote copy is always keyed.
    fn persist(&mut self, mut partial: PartialArticle) {
        if partial.article_id.is_none() {
            partial.article_id = Some(self.article_id.clone());
        }
        self.persistence.save(&partial);
        self.persistence.upload(&partial);
    }

    /// Reindex the whole document, drop a dangling focus and persist the pages
    fn commit_pages(&mut self) {
        reindex(&mut self.pages);
        self.drop_dangling_focus();
        self.persist(PartialArticle::with_pages(&self.pages));
    }

    /// Clear the focus if its page or frame no longer exists
    fn drop_dangling_focus(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };

        let exists = self
            .pages
            .get(focus.page_index)
            .is_some_and(|page| focus.frame_index < page.frames.len());
        if !exists {
            log::debug!(
                "Focus {}/{} no longer exists, clearing",
                focus.page_index,
                focus.frame_index
            );
            self.focus = None;
        }
    }

    /// Run `edit` on one page, then commit if it reported a change
    fn update_page(&mut self, page_index: usize, edit: impl FnOnce(&mut Page) -> bool) -> bool {
        let Some(page) = self.pages.get_mut(page_index) else {
            log::warn!("Page {} out of bounds (len {}), ignoring", page_index, self.pages.len());
            return false;
        };

        let changed = edit(page);
        if changed {
            self.commit_pages();
        }
        changed
    }

    /// Run `edit` on one component with its page's template, then commit
    fn update_component(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        edit: impl FnOnce(&mut Component, LayoutTemplate),
    ) {
        self.update_page(page_index, |page| {
            let template = page.template();
            let Some(component) = page
                .frames
                .get_mut(frame_index)
                .and_then(|frame| frame.components.get_mut(component_index))
            else {
                log::warn!(
                    "Component {}/{}/{} does not exist, ignoring",
                    page_index,
                    frame_index,
                    component_index
                );
                return false;
            };

            edit(component, template);
            true
        });
    }

    fn promote_placeholder(&mut self, index: usize) {
        let is_new = self.placeholders.get(index).is_some_and(|p| p.is_new);
        if is_new {
            self.append_default_placeholder();
            self.set_placeholder(index as i64, Placeholder::committed(index));
        }
    }
}

impl<P: PersistenceAdapter> ArticleReader for DocumentStore<P> {
    fn article_id(&self) -> &str {
        &self.article_id
    }

    fn article_title(&self) -> &str {
        &self.article_title
    }

    fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    fn current_editing_id(&self) -> Option<&str> {
        self.current_editing_id.as_deref()
    }

    fn focus(&self) -> Option<FocusPointer> {
        self.focus
    }

    fn draft_page(&self) -> Page {
        let index = self
            .current_editing_id
            .as_deref()
            .and_then(parse_index)
            .unwrap_or(self.pages.len());

        match self.pages.get(index) {
            Some(page) => page.clone(),
            None => {
                let mut page = create_page(LayoutTemplate::Single, false);
                page.id = index.to_string();
                page
            }
        }
    }
}

impl<P: PersistenceAdapter> ArticleWriter for DocumentStore<P> {
    fn set_page(&mut self, index: i64, mut page: Page) {
        let Some(index) = clamp_index(index).filter(|i| *i <= self.pages.len()) else {
            log::warn!("Page index {} past end (len {}), ignoring", index, self.pages.len());
            return;
        };

        page.normalize();
        if index == self.pages.len() {
            self.pages.push(page);
        } else {
            self.pages[index] = page;
        }

        log::info!("Wrote page {}", index);
        self.commit_pages();
    }

    fn remove_page(&mut self, id: &str) {
        let Some(index) = parse_index(id) else {
            log::warn!("Cannot remove page with id '{}'", id);
            return;
        };

        let removed_page = index < self.pages.len();
        if removed_page {
            self.pages.remove(index);
        }

        // The sentinel is never removed here
        if self.placeholders.get(index).is_some_and(|p| !p.is_new) {
            self.placeholders.remove(index);
        }
        renumber_placeholders(&mut self.placeholders);
        if self.placeholders.last().map_or(true, |p| !p.is_new) {
            self.append_default_placeholder();
        }

        if !removed_page {
            log::warn!("No page at {}, placeholders renumbered only", index);
            return;
        }

        self.focus = match self.focus {
            Some(focus) if focus.page_index == index => None,
            Some(focus) if focus.page_index > index => Some(FocusPointer {
                page_index: focus.page_index - 1,
                ..focus
            }),
            other => other,
        };

        let editing = self.current_editing_id.as_deref().and_then(parse_index);
        match editing {
            Some(editing) if editing == index => self.current_editing_id = None,
            Some(editing) if editing > index => {
                self.current_editing_id = Some((editing - 1).to_string())
            }
            _ => {}
        }

        log::info!("Removed page {}, {} remaining", index, self.pages.len());
        self.commit_pages();
    }

    fn set_placeholder(&mut self, index: i64, mut data: Placeholder) {
        let Some(index) = clamp_index(index).filter(|i| *i <= self.placeholders.len()) else {
            log::warn!(
                "Placeholder index {} past end (len {}), ignoring",
                index,
                self.placeholders.len()
            );
            return;
        };

        data.id = index.to_string();
        if index == self.placeholders.len() {
            self.placeholders.push(data);
        } else {
            self.placeholders[index] = data;
        }
    }

    fn append_default_placeholder(&mut self) {
        let index = self.placeholders.len();
        self.placeholders.push(Placeholder::sentinel(index));
    }

    fn set_current_editing_id(&mut self, id: Option<String>) {
        self.current_editing_id = id;
    }

    fn set_article_id(&mut self, id: &str) {
        self.article_id = id.to_string();
        self.persist(PartialArticle::with_article_id(id));
    }

    fn set_article_title(&mut self, title: &str) {
        self.article_title = title.to_string();
        self.persist(PartialArticle::with_title(title));
    }

    fn set_focus(&mut self, component: Option<&Component>) {
        match component {
            None => self.focus = None,
            Some(component) => match FocusPointer::from_component(component) {
                Some(pointer) => self.focus = Some(pointer),
                None => log::debug!("Focus target has no page/frame index, keeping focus"),
            },
        }
    }

    fn reset_article(&mut self) {
        self.persistence.clear();

        self.article_id = new_article_id();
        self.article_title.clear();
        self.pages.clear();
        self.placeholders = placeholders_for(0);
        self.current_editing_id = None;
        self.focus = None;
        self.pending_focus.cancel();

        log::info!("Reset to new article {}", self.article_id);
        self.persist(PartialArticle {
            article_id: Some(self.article_id.clone()),
            title: Some(String::new()),
            pages: Some(Vec::new()),
        });
    }

    fn load_article(&mut self, article: PartialArticle) {
        self.persistence.clear();

        self.article_id = article
            .article_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(new_article_id);
        self.article_title = article.title.unwrap_or_default();
        self.pages = article.pages.unwrap_or_default();
        for page in &mut self.pages {
            page.normalize();
        }
        reindex(&mut self.pages);
        self.placeholders = placeholders_for(self.pages.len());
        self.current_editing_id = None;
        self.focus = None;
        self.pending_focus.cancel();

        log::info!(
            "Loaded article {} with {} pages",
            self.article_id,
            self.pages.len()
        );
        self.persist(PartialArticle {
            article_id: Some(self.article_id.clone()),
            title: Some(self.article_title.clone()),
            pages: Some(self.pages.clone()),
        });
    }

    fn set_page_layout_at(&mut self, page_index: usize, template: LayoutTemplate) {
        self.update_page(page_index, |page| {
            page.set_layout(template);
            true
        });
    }

    fn set_page_pinnable_at(&mut self, page_index: usize, pinnable: bool) {
        self.update_page(page_index, |page| {
            page.set_pinnable(pinnable);
            true
        });
    }

    fn append_frame_at(&mut self, page_index: usize) {
        self.update_page(page_index, |page| page.append_frame());
    }

    fn remove_frame_at(&mut self, page_index: usize, frame_index: usize) {
        let focus = self.focus;
        if !self.update_page(page_index, |page| page.remove_frame(frame_index)) {
            return;
        }

        self.focus = match focus {
            Some(focus) if focus.page_index != page_index => Some(focus),
            Some(focus) if focus.frame_index == frame_index => None,
            Some(focus) if focus.frame_index > frame_index => Some(FocusPointer {
                frame_index: focus.frame_index - 1,
                ..focus
            }),
            other => other,
        };
    }

    fn set_component_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        component: Component,
    ) {
        self.update_page(page_index, |page| {
            let template = page.template();
            let Some(frame) = page.frames.get_mut(frame_index) else {
                log::warn!("Frame {} out of bounds on page {}, ignoring", frame_index, page_index);
                return false;
            };
            let Some(slot) = frame.components.get_mut(component_index) else {
                log::warn!("Component {} out of bounds, ignoring", component_index);
                return false;
            };

            // Content is replaced in place; the position moves by swapping
            // so the frame keeps one component per slot
            let requested = component.position;
            let current = slot.position;
            *slot = Component {
                position: current,
                ..component
            };
            if requested != current {
                frame.set_component_position(component_index, requested, template);
            }
            true
        });
    }

    fn change_component_type_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        kind: ComponentType,
    ) {
        self.update_component(page_index, frame_index, component_index, |component, _| {
            component.change_type(kind)
        });
    }

    fn change_component_position_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        position: Position,
    ) {
        self.update_page(page_index, |page| {
            let template = page.template();
            match page.frames.get_mut(frame_index) {
                Some(frame) => frame.set_component_position(component_index, position, template),
                None => {
                    log::warn!("Frame {} out of bounds on page {}, ignoring", frame_index, page_index);
                    false
                }
            }
        });
    }

    fn set_component_animation_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        animation: Option<String>,
    ) {
        self.update_component(page_index, frame_index, component_index, |component, _| {
            component.set_animation(animation)
        });
    }

    fn commit_page(&mut self, page: Page) {
        let Some(id) = self.current_editing_id.take() else {
            log::warn!("No page is being edited, ignoring commit");
            return;
        };
        let Some(index) = parse_index(&id) else {
            log::warn!("Editing id '{}' is not a page index, ignoring commit", id);
            return;
        };

        self.set_page(index as i64, page);
        if index < self.pages.len() {
            self.promote_placeholder(index);
        }
    }

    fn cancel_editing(&mut self) {
        self.current_editing_id = None;
    }

    fn queue_focus(&mut self, component: Option<Component>, now_ms: f64) {
        self.pending_focus.push(component, now_ms);
    }

    fn flush_focus(&mut self, now_ms: f64) -> bool {
        match self.pending_focus.poll(now_ms) {
            Some(component) => {
                let before = self.focus;
                self.set_focus(component.as_ref());
                before != self.focus
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::persistence::MemoryPersistence;

    fn store() -> (DocumentStore<MemoryPersistence>, MemoryPersistence) {
        let persistence = MemoryPersistence::new();
        (DocumentStore::new(persistence.clone()), persistence)
    }

    #[test]
    fn test_new_store_generates_and_persists_id() {
        let (store, persistence) = store();
        assert!(!store.article_id().is_empty());
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);
        assert_eq!(persistence.loads(), 1);
        assert_eq!(
            persistence.stored().unwrap().article_id.as_deref(),
            Some(store.article_id())
        );
    }

    #[test]
    fn test_hydrate_rebuilds_placeholders() {
        let persistence = MemoryPersistence::with_stored(PartialArticle {
            article_id: Some("a1".to_string()),
            title: Some("Rivers".to_string()),
            pages: Some(vec![
                create_page(LayoutTemplate::Single, false),
                create_page(LayoutTemplate::TopBottom, false),
            ]),
        });
        let store = DocumentStore::new(persistence.clone());

        assert_eq!(store.article_id(), "a1");
        assert_eq!(store.article_title(), "Rivers");
        assert_eq!(store.placeholders().len(), 3);
        assert!(store.placeholders()[2].is_new);
        assert_eq!(store.pages()[1].id, "1");
        // Nothing to write back on a clean load
        assert!(persistence.saves().is_empty());
    }

    #[test]
    fn test_set_page_clamps_negative_and_ignores_gaps() {
        let (mut store, _) = store();
        store.set_page(-3, create_page(LayoutTemplate::Single, false));
        assert_eq!(store.pages().len(), 1);

        store.set_page(5, create_page(LayoutTemplate::Single, false));
        assert_eq!(store.pages().len(), 1);
    }

    #[test]
    fn test_set_page_persists_pages() {
        let (mut store, persistence) = store();
        store.set_page(0, create_page(LayoutTemplate::LeftRight, false));

        let last = persistence.saves().pop().unwrap();
        assert_eq!(last.pages.unwrap().len(), 1);
        assert_eq!(persistence.uploads().len(), persistence.saves().len());
    }

    #[test]
    fn test_title_write_persists() {
        let (mut store, persistence) = store();
        store.set_article_title("Rivers of Asia");
        assert_eq!(store.article_title(), "Rivers of Asia");
        let uploaded = persistence.uploads().pop().unwrap();
        assert_eq!(uploaded.title.as_deref(), Some("Rivers of Asia"));
        assert_eq!(uploaded.article_id.as_deref(), Some(store.article_id()));
        assert_eq!(uploaded.pages, None);
    }

    #[test]
    fn test_remove_page_keeps_sentinel() {
        let (mut store, _) = store();
        store.remove_page("0");
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);

        store.remove_page("not-a-number");
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);
    }

    #[test]
    fn test_remove_page_shifts_focus_and_editing() {
        let persistence = MemoryPersistence::with_stored(PartialArticle {
            article_id: Some("a1".to_string()),
            title: None,
            pages: Some(vec![create_page(LayoutTemplate::Single, false); 3]),
        });
        let mut store = DocumentStore::new(persistence);
        let focused = store.pages()[2].frames[0].components[0].clone();
        store.set_focus(Some(&focused));
        store.set_current_editing_id(Some("2".to_string()));

        store.remove_page("0");

        assert_eq!(store.focus(), Some(FocusPointer { page_index: 1, frame_index: 0 }));
        assert_eq!(store.current_editing_id(), Some("1"));

        store.remove_page("1");
        assert_eq!(store.focus(), None);
        assert_eq!(store.current_editing_id(), None);
    }

    #[test]
    fn test_component_commands() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::LeftRight, false));

        store.change_component_type_at(0, 0, 1, ComponentType::Image);
        store.set_component_animation_at(0, 0, 1, Some("zoom".to_string()));
        store.change_component_position_at(0, 0, 1, Position::Left);

        let frame = &store.pages()[0].frames[0];
        assert_eq!(frame.components[1].kind(), ComponentType::Image);
        assert_eq!(frame.components[1].animation.as_deref(), Some("zoom"));
        assert_eq!(frame.positions(), vec![Position::Right, Position::Left]);

        // Out of range is a silent no-op
        store.change_component_type_at(0, 4, 0, ComponentType::Html);
        store.change_component_type_at(9, 0, 0, ComponentType::Html);
        assert_eq!(store.pages().len(), 1);
    }

    #[test]
    fn test_set_component_at_swaps_positions() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::TopBottom, false));

        let mut replacement = Component::new(Position::Bottom);
        replacement.apply_image_upload("map.png", "data:image/png;base64,AAA".to_string(), 3);
        store.set_component_at(0, 0, 0, replacement);

        let frame = &store.pages()[0].frames[0];
        assert_eq!(frame.positions(), vec![Position::Bottom, Position::Top]);
        assert_eq!(frame.components[0].kind(), ComponentType::Image);
        assert_eq!(frame.components[0].location(), Some((0, 0)));
    }

    #[test]
    fn test_frame_commands() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, false));

        store.append_frame_at(0);
        assert_eq!(store.pages()[0].frames.len(), 1);

        store.set_page_pinnable_at(0, true);
        store.append_frame_at(0);
        store.append_frame_at(0);
        assert_eq!(store.pages()[0].frames.len(), 3);
        assert_eq!(store.pages()[0].frames[2].components[0].frame_index, Some(2));

        let focused = store.pages()[0].frames[1].components[0].clone();
        store.set_focus(Some(&focused));
        store.remove_frame_at(0, 1);
        assert_eq!(store.focus(), None);
        assert_eq!(store.pages()[0].frames.len(), 2);

        let focused = store.pages()[0].frames[1].components[0].clone();
        store.set_focus(Some(&focused));
        store.remove_frame_at(0, 0);
        assert_eq!(store.focus(), Some(FocusPointer { page_index: 0, frame_index: 0 }));
        assert_eq!(store.pages()[0].frames[1].components[0].frame_index, Some(1));
    }

    #[test]
    fn test_draft_page() {
        let (mut store, _) = store();
        store.set_current_editing_id(Some("0".to_string()));
        let draft = store.draft_page();
        assert_eq!(draft.template(), LayoutTemplate::Single);
        assert!(!draft.pinnable);

        store.set_page(0, create_page(LayoutTemplate::TopBottom, false));
        assert_eq!(store.draft_page().template(), LayoutTemplate::TopBottom);
    }

    #[test]
    fn test_commit_without_editing_is_ignored() {
        let (mut store, _) = store();
        store.commit_page(create_page(LayoutTemplate::Single, false));
        assert!(store.pages().is_empty());
    }

    #[test]
    fn test_debounced_focus() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, true));
        store.append_frame_at(0);
        let hovered = store.pages()[0].frames[1].components[0].clone();

        store.queue_focus(Some(hovered), 0.0);
        assert!(!store.flush_focus(100.0));
        assert_eq!(store.focus(), None);

        assert!(store.flush_focus(500.0));
        assert_eq!(store.focus(), Some(FocusPointer { page_index: 0, frame_index: 1 }));

        store.queue_focus(None, 600.0);
        assert!(store.flush_focus(1200.0));
        assert_eq!(store.focus(), None);
    }

    #[test]
    fn test_reset_article() {
        let (mut store, persistence) = store();
        let first_id = store.article_id().to_string();
        store.set_article_title("Old");
        store.set_page(0, create_page(LayoutTemplate::Single, false));

        store.reset_article();

        assert_ne!(store.article_id(), first_id);
        assert_eq!(store.article_title(), "");
        assert!(store.pages().is_empty());
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);
        assert_eq!(persistence.clears(), 1);

        let stored = persistence.stored().unwrap();
        assert_eq!(stored.article_id.as_deref(), Some(store.article_id()));
        assert_eq!(stored.pages, Some(Vec::new()));
    }

    #[test]
    fn test_unpinning_clears_focus_on_dropped_frame() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, true));
        store.append_frame_at(0);
        store.append_frame_at(0);
        let focused = store.pages()[0].frames[2].components[0].clone();
        store.set_focus(Some(&focused));

        store.set_page_pinnable_at(0, false);

        assert_eq!(store.pages()[0].frames.len(), 1);
        assert_eq!(store.focus(), None);
    }

    #[test]
    fn test_replacing_page_with_fewer_frames_clears_focus() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, true));
        store.append_frame_at(0);
        let focused = store.pages()[0].frames[1].components[0].clone();
        store.set_focus(Some(&focused));

        store.set_page(0, create_page(LayoutTemplate::Single, false));
        assert_eq!(store.focus(), None);

        // Focus on a frame that survives is kept
        let focused = store.pages()[0].frames[0].components[0].clone();
        store.set_focus(Some(&focused));
        store.set_page(0, create_page(LayoutTemplate::TopBottom, false));
        assert_eq!(store.focus(), Some(FocusPointer { page_index: 0, frame_index: 0 }));
    }

    #[test]
    fn test_remove_earlier_frame_shifts_focus() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, true));
        store.append_frame_at(0);
        store.append_frame_at(0);
        let focused = store.pages()[0].frames[2].components[0].clone();
        store.set_focus(Some(&focused));

        store.remove_frame_at(0, 0);
        assert_eq!(store.focus(), Some(FocusPointer { page_index: 0, frame_index: 1 }));
    }

    #[test]
    fn test_oversized_index_is_past_end() {
        let (mut store, _) = store();
        store.set_page(0, create_page(LayoutTemplate::Single, false));

        store.set_page(i64::MAX, create_page(LayoutTemplate::TopBottom, false));
        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.pages()[0].template(), LayoutTemplate::Single);

        store.set_placeholder(i64::MAX, Placeholder::committed(0));
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);

        assert_eq!(clamp_index(-4), Some(0));
        assert_eq!(clamp_index(3), Some(3));
    }

    #[test]
    fn test_every_upload_carries_article_id() {
        let (mut store, persistence) = store();
        store.set_article_title("Rivers");
        store.set_page(0, create_page(LayoutTemplate::Single, false));
        store.remove_page("0");

        for partial in persistence.uploads() {
            assert_eq!(partial.article_id.as_deref(), Some(store.article_id()));
        }
    }

    #[test]
    fn test_load_article_replaces_state() {
        let (mut store, persistence) = store();
        store.set_article_title("Old");
        store.set_page(0, create_page(LayoutTemplate::Single, false));
        let focused = store.pages()[0].frames[0].components[0].clone();
        store.set_focus(Some(&focused));
        store.set_current_editing_id(Some("0".to_string()));

        let mut broken = create_page(LayoutTemplate::LeftRight, false);
        broken.id = "9".to_string();
        broken.frames[0].components.pop();
        store.load_article(PartialArticle {
            article_id: Some("remote-1".to_string()),
            title: Some("Deltas".to_string()),
            pages: Some(vec![broken, create_page(LayoutTemplate::TopBottom, false)]),
        });

        assert_eq!(store.article_id(), "remote-1");
        assert_eq!(store.article_title(), "Deltas");
        assert_eq!(store.pages().len(), 2);
        assert_eq!(store.pages()[0].id, "0");
        assert_eq!(store.pages()[0].frames[0].components.len(), 2);
        assert_eq!(store.pages()[1].frames[0].components[1].page_index, Some(1));
        assert_eq!(
            store.placeholders(),
            &[Placeholder::committed(0), Placeholder::committed(1), Placeholder::sentinel(2)]
        );
        assert_eq!(store.focus(), None);
        assert_eq!(store.current_editing_id(), None);

        assert_eq!(persistence.clears(), 1);
        let stored = persistence.stored().unwrap();
        assert_eq!(stored.article_id.as_deref(), Some("remote-1"));
        assert_eq!(stored.title.as_deref(), Some("Deltas"));
        assert_eq!(stored.pages.map(|pages| pages.len()), Some(2));
    }

    #[test]
    fn test_load_article_without_id_starts_fresh_id() {
        let (mut store, _) = store();
        store.load_article(PartialArticle::with_title("Untitled"));
        assert!(!store.article_id().is_empty());
        assert!(store.pages().is_empty());
        assert_eq!(store.placeholders(), &[Placeholder::sentinel(0)]);
    }
}
