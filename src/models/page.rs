//! Pages: one scrollable unit of the article
//!
//! A page owns a layout and one or more frames. Non-pinnable pages always
//! have exactly one frame; pinnable pages animate their frames in sequence
//! while pinned to the viewport.

use serde::{Deserialize, Serialize};

use super::frame::{create_frame, Frame};
use super::layout::{Layout, LayoutTemplate};
use super::serde_helpers::deserialize_null_default;

/// One scrollable unit of the article
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Current index in the article, as a string. Reassigned on every
    /// structural edit; never use it as an identity.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub pinnable: bool,

    #[serde(default)]
    pub layout: Layout,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub frames: Vec<Frame>,
}

impl Default for Page {
    fn default() -> Self {
        create_page(LayoutTemplate::Single, false)
    }
}

/// New page with a single fresh frame
pub fn create_page(template: LayoutTemplate, pinnable: bool) -> Page {
    Page {
        id: "0".to_string(),
        pinnable,
        layout: Layout::new(template),
        frames: vec![create_frame(template)],
    }
}

impl Page {
    pub fn template(&self) -> LayoutTemplate {
        self.layout.template
    }

    /// Switch the layout template. Every frame is replaced by a fresh frame
    /// for the new template and the frame count is kept. Content is
    /// discarded even when the template does not change.
    pub fn set_layout(&mut self, template: LayoutTemplate) {
        let frame_count = self.frames.len().max(1);
        log::debug!(
            "Switching page {} from {} to {} ({} frames reset)",
            self.id,
            self.layout.template.name(),
            template.name(),
            frame_count
        );

        self.layout.template = template;
        self.frames = (0..frame_count).map(|_| create_frame(template)).collect();
        self.renumber_frames();
    }

    /// Push one more frame shaped like the current template.
    /// Ignored for non-pinnable pages, which keep a single frame.
    pub fn append_frame(&mut self) -> bool {
        if !self.pinnable {
            log::warn!("Page {} is not pinnable, not adding a frame", self.id);
            return false;
        }

        self.frames.push(create_frame(self.layout.template));
        self.renumber_frames();
        true
    }

    /// Remove the frame at `frame_index`. A page keeps at least one frame,
    /// and indices past the end are ignored.
    pub fn remove_frame(&mut self, frame_index: usize) -> bool {
        if frame_index >= self.frames.len() {
            log::warn!(
                "Frame {} out of bounds on page {} (len {}), ignoring",
                frame_index,
                self.id,
                self.frames.len()
            );
            return false;
        }

        if self.frames.len() == 1 {
            log::warn!("Page {} must keep its last frame", self.id);
            return false;
        }

        self.frames.remove(frame_index);
        self.renumber_frames();
        true
    }

    /// Toggle pinning. Unpinning truncates the page to its first frame.
    pub fn set_pinnable(&mut self, pinnable: bool) {
        self.pinnable = pinnable;
        if !pinnable && self.frames.len() > 1 {
            log::debug!("Page {} unpinned, dropping {} frames", self.id, self.frames.len() - 1);
            self.frames.truncate(1);
        }
    }

    /// Restore every page invariant: at least one frame, a single frame
    /// when not pinnable, and one component per template slot in each frame.
    pub fn normalize(&mut self) {
        let template = self.layout.template;

        if self.frames.is_empty() {
            self.frames.push(create_frame(template));
        }
        if !self.pinnable {
            self.frames.truncate(1);
        }
        for frame in &mut self.frames {
            frame.normalize(template);
        }
        self.renumber_frames();
    }

    /// Reassign frame and component ids to their current indices
    pub fn renumber_frames(&mut self) {
        for (frame_index, frame) in self.frames.iter_mut().enumerate() {
            frame.id = frame_index.to_string();
            for (component_index, component) in frame.components.iter_mut().enumerate() {
                component.id = component_index.to_string();
            }
        }
    }

    /// Total number of components across all frames
    pub fn component_count(&self) -> usize {
        self.frames.iter().map(|f| f.components.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::component::{ComponentContent, TextMetadata};
    use crate::models::layout::Position;

    fn write_text(page: &mut Page, frame: usize, component: usize, html: &str) {
        page.frames[frame].components[component].content = ComponentContent::Text(TextMetadata {
            html_content: html.to_string(),
        });
    }

    #[test]
    fn test_create_page() {
        let page = create_page(LayoutTemplate::TopBottom, true);
        assert_eq!(page.frames.len(), 1);
        assert_eq!(page.frames[0].positions(), vec![Position::Top, Position::Bottom]);
    }

    #[test]
    fn test_set_layout_is_idempotent() {
        let mut page = create_page(LayoutTemplate::LeftRight, true);
        page.append_frame();
        write_text(&mut page, 1, 0, "<p>gone</p>");

        page.set_layout(LayoutTemplate::TopBottom);
        let first = page.clone();
        page.set_layout(LayoutTemplate::TopBottom);

        assert_eq!(page, first);
        assert_eq!(page.frames.len(), 2);
    }

    #[test]
    fn test_left_right_to_single_drops_content() {
        let mut page = create_page(LayoutTemplate::LeftRight, false);
        write_text(&mut page, 0, 0, "<p>left</p>");
        write_text(&mut page, 0, 1, "<p>right</p>");

        page.set_layout(LayoutTemplate::Single);
        assert_eq!(page.component_count(), 1);

        page.set_layout(LayoutTemplate::LeftRight);
        assert_eq!(page.component_count(), 2);
        for component in &page.frames[0].components {
            assert_eq!(component.content, ComponentContent::default());
        }
    }

    #[test]
    fn test_append_frame_requires_pinnable() {
        let mut page = create_page(LayoutTemplate::Single, false);
        assert!(!page.append_frame());
        assert_eq!(page.frames.len(), 1);

        page.set_pinnable(true);
        assert!(page.append_frame());
        assert_eq!(page.frames.len(), 2);
        assert_eq!(page.frames[1].id, "1");
    }

    #[test]
    fn test_remove_frame_keeps_last() {
        let mut page = create_page(LayoutTemplate::Single, true);
        page.append_frame();
        page.append_frame();

        assert!(!page.remove_frame(7));
        assert!(page.remove_frame(0));
        assert_eq!(page.frames.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["0", "1"]);

        assert!(page.remove_frame(1));
        assert!(!page.remove_frame(0));
        assert_eq!(page.frames.len(), 1);
    }

    #[test]
    fn test_unpinning_truncates_frames() {
        let mut page = create_page(LayoutTemplate::Single, true);
        page.append_frame();
        page.set_pinnable(false);
        assert_eq!(page.frames.len(), 1);
    }

    #[test]
    fn test_normalize_enforces_invariants() {
        let mut page = create_page(LayoutTemplate::TopBottom, false);
        page.frames.clear();
        page.normalize();
        assert_eq!(page.frames.len(), 1);

        let mut page = create_page(LayoutTemplate::TopBottom, true);
        page.append_frame();
        page.pinnable = false;
        page.frames[0].components.pop();
        page.normalize();
        assert_eq!(page.frames.len(), 1);
        assert_eq!(page.frames[0].positions(), vec![Position::Top, Position::Bottom]);
    }
}
