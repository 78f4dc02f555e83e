//! Read and write capabilities of the document store
//!
//! Presentation code that only renders takes `&impl ArticleReader`; code
//! that edits takes `&mut impl ArticleWriter`. Both are implemented by
//! [`super::DocumentStore`].

use crate::models::{
    Article, Component, ComponentType, FocusPointer, LayoutTemplate, Page, Placeholder, Position,
};

use crate::services::persistence::PartialArticle;

use super::selectors::{self, ComponentOption, ContentSummary};

/// Read-only selectors over the store state
pub trait ArticleReader {
    fn article_id(&self) -> &str;

    fn article_title(&self) -> &str;

    fn pages(&self) -> &[Page];

    fn placeholders(&self) -> &[Placeholder];

    /// Placeholder id of the page open in the form, if any
    fn current_editing_id(&self) -> Option<&str>;

    fn focus(&self) -> Option<FocusPointer>;

    /// Page currently open in the form: the committed page at the editing
    /// index, or a fresh single-slot page for a new one
    fn draft_page(&self) -> Page;

    /// Owned snapshot of the article
    fn article(&self) -> Article {
        Article {
            id: self.article_id().to_string(),
            title: self.article_title().to_string(),
            pages: self.pages().to_vec(),
        }
    }

    /// Components offered for reuse, committed ones first, then `unsaved`
    fn component_options(&self, unsaved: &[Component]) -> Vec<ComponentOption> {
        selectors::component_options(self.pages(), unsaved)
    }

    fn content_summary(&self) -> ContentSummary {
        selectors::content_summary(self.pages())
    }
}

/// Write commands. Every command is total: malformed indices are clamped
/// or ignored, never reported.
pub trait ArticleWriter {
    /// Write `page` at `index` (negative clamps to 0, one past the end
    /// appends) and reindex the whole document
    fn set_page(&mut self, index: i64, page: Page);

    /// Remove the page and placeholder whose positional id is `id`
    fn remove_page(&mut self, id: &str);

    fn set_placeholder(&mut self, index: i64, data: Placeholder);

    /// Push a fresh "new page" sentinel
    fn append_default_placeholder(&mut self);

    fn set_current_editing_id(&mut self, id: Option<String>);

    fn set_article_id(&mut self, id: &str);

    fn set_article_title(&mut self, title: &str);

    /// Point the focus at a committed component's (page, frame); `None`
    /// clears. Components without both indices leave the focus unchanged.
    fn set_focus(&mut self, component: Option<&Component>);

    /// Start over with a fresh article id and an empty document
    fn reset_article(&mut self);

    /// Replace the whole article with a stored copy (e.g. fetched by id).
    /// The local copy is cleared first; focus and editing state are reset.
    fn load_article(&mut self, article: PartialArticle);

    fn set_page_layout_at(&mut self, page_index: usize, template: LayoutTemplate);

    fn set_page_pinnable_at(&mut self, page_index: usize, pinnable: bool);

    fn append_frame_at(&mut self, page_index: usize);

    fn remove_frame_at(&mut self, page_index: usize, frame_index: usize);

    /// Replace one component. Its position is kept inside the page's slot set.
    fn set_component_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        component: Component,
    );

    fn change_component_type_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        kind: ComponentType,
    );

    fn change_component_position_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        position: Position,
    );

    fn set_component_animation_at(
        &mut self,
        page_index: usize,
        frame_index: usize,
        component_index: usize,
        animation: Option<String>,
    );

    /// Save the page open in the form and close the form. A new page's
    /// placeholder is promoted and a fresh sentinel appended.
    fn commit_page(&mut self, page: Page);

    /// Close the form without writing anything
    fn cancel_editing(&mut self);

    /// Record a hovered component (or `None`); applied by `flush_focus`
    /// once it has been stable for the debounce delay
    fn queue_focus(&mut self, component: Option<Component>, now_ms: f64);

    /// Apply a settled hover value. Returns true if the focus was updated.
    fn flush_focus(&mut self, now_ms: f64) -> bool;
}
