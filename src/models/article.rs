//! Article and sidebar placeholders
//!
//! The article is the whole document being authored. Placeholders are the
//! sidebar's stand-ins for pages: one per committed page plus a trailing
//! "new page" sentinel.

use serde::{Deserialize, Serialize};

use super::page::Page;
use super::serde_helpers::deserialize_null_default;

/// The whole document being authored
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "articleId")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub pages: Vec<Page>,
}

/// Sidebar entry standing in for a page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// Current index, as a string
    pub id: String,

    /// True only for the trailing "add new page" sentinel
    pub is_new: bool,
}

impl Placeholder {
    /// The "add new page" sentinel at `index`
    pub fn sentinel(index: usize) -> Self {
        Self {
            id: index.to_string(),
            is_new: true,
        }
    }

    /// Placeholder for a committed page at `index`
    pub fn committed(index: usize) -> Self {
        Self {
            id: index.to_string(),
            is_new: false,
        }
    }
}

/// Placeholder list for `page_count` committed pages plus the sentinel
pub fn placeholders_for(page_count: usize) -> Vec<Placeholder> {
    (0..page_count)
        .map(Placeholder::committed)
        .chain(std::iter::once(Placeholder::sentinel(page_count)))
        .collect()
}

/// Recompute every positional id and denormalized index in the document.
///
/// Runs over every page, frame and component on each write; ids are
/// positions, not identities.
pub fn reindex(pages: &mut [Page]) {
    let mut components = 0usize;
    for (page_index, page) in pages.iter_mut().enumerate() {
        page.id = page_index.to_string();
        for (frame_index, frame) in page.frames.iter_mut().enumerate() {
            frame.id = frame_index.to_string();
            frame.page_index = Some(page_index);
            for (component_index, component) in frame.components.iter_mut().enumerate() {
                component.id = component_index.to_string();
                component.page_index = Some(page_index);
                component.frame_index = Some(frame_index);
                components += 1;
            }
        }
    }
    log::debug!("Reindexed {} pages, {} components", pages.len(), components);
}

/// Reassign placeholder ids to their current indices
pub fn renumber_placeholders(placeholders: &mut [Placeholder]) {
    for (index, placeholder) in placeholders.iter_mut().enumerate() {
        placeholder.id = index.to_string();
    }
}
