//! Derived projections for the presentation layer

use serde::{Deserialize, Serialize};

use crate::models::{Component, ComponentType, Page};

/// One entry of the "use existing component" picker
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOption {
    /// "[Page 1 - Frame 2] Image (Left)" or "[New] Text (Center)"
    pub label: String,

    /// Index of the option in the list, as a string
    pub value: String,

    pub component: Component,
}

/// Counts shown above the preview
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub pages: usize,
    pub frames: usize,
    pub images: usize,
    pub texts: usize,
    pub htmls: usize,
}

fn option_label(component: &Component) -> String {
    let kind = component.kind().label();
    let position = component.position.label();
    match component.location() {
        Some((page, frame)) => format!("[Page {} - Frame {}] {} ({})", page + 1, frame + 1, kind, position),
        None => format!("[New] {} ({})", kind, position),
    }
}

/// Reusable components across the document followed by `unsaved` ones.
/// Only components with content (an image file or non-empty text) qualify.
pub fn component_options(pages: &[Page], unsaved: &[Component]) -> Vec<ComponentOption> {
    pages
        .iter()
        .flat_map(|page| page.frames.iter())
        .flat_map(|frame| frame.components.iter())
        .chain(unsaved.iter())
        .filter(|component| component.is_reusable())
        .enumerate()
        .map(|(index, component)| ComponentOption {
            label: option_label(component),
            value: index.to_string(),
            component: component.clone(),
        })
        .collect()
}

pub fn content_summary(pages: &[Page]) -> ContentSummary {
    let mut summary = ContentSummary {
        pages: pages.len(),
        ..Default::default()
    };

    for frame in pages.iter().flat_map(|page| page.frames.iter()) {
        summary.frames += 1;
        for component in &frame.components {
            match component.kind() {
                ComponentType::Image => summary.images += 1,
                ComponentType::Text => summary.texts += 1,
                ComponentType::Html => summary.htmls += 1,
            }
        }
    }

    summary
}
