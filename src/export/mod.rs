//! Generation payload
//!
//! Shapes the article into the request body the website generation service
//! accepts. Ids become composite paths (`"p"`, `"p-f"`, `"p-f-c"`) so the
//! generator can address every node, and image/text components carry their
//! file name or html as top-level convenience fields.

use serde::{Deserialize, Serialize};

use crate::models::{Article, Component, ComponentContent, Frame, Layout, Page};

/// Body of a generate-website request
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub article_id: String,
    pub title: String,
    pub pages: Vec<GenerationPage>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPage {
    pub id: String,
    pub pinnable: bool,
    pub layout: Layout,
    pub frames: Vec<GenerationFrame>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationFrame {
    pub id: String,
    pub components: Vec<GenerationComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<usize>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationComponent {
    #[serde(flatten)]
    pub component: Component,

    /// Uploaded file name, image components only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Rich text body, text components only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
}

/// Whether the generator should return a zip or a hosted preview
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
    Preview,
    Download,
}

impl GenerationMode {
    /// Value of the `is_download` query flag
    pub fn is_download(&self) -> bool {
        matches!(self, GenerationMode::Download)
    }

    pub fn query(&self) -> String {
        format!("is_download={}", self.is_download())
    }
}

/// Reply to a preview generation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreviewResponse {
    pub id: String,
    pub url: String,
}

impl PreviewResponse {
    /// Iframe snippet for pasting the preview into a wiki page
    pub fn embed_snippet(&self) -> String {
        format!(r#"<iframe height="100%" width="100%" src="{}"></iframe>"#, self.url)
    }
}

/// Generation needs an article id and at least one page
pub fn can_generate(article: &Article) -> bool {
    !article.id.is_empty() && !article.pages.is_empty()
}

fn export_component(component: &Component, page: usize, frame: usize, index: usize) -> GenerationComponent {
    let (image, content_html) = match &component.content {
        ComponentContent::Image(meta) => (meta.image.clone(), None),
        ComponentContent::Text(meta) => (None, Some(meta.html_content.clone())),
        ComponentContent::Html(_) => (None, None),
    };

    GenerationComponent {
        component: Component {
            id: format!("{}-{}-{}", page, frame, index),
            ..component.clone()
        },
        image,
        content_html,
    }
}

fn export_frame(frame: &Frame, page: usize, index: usize) -> GenerationFrame {
    GenerationFrame {
        id: format!("{}-{}", page, index),
        components: frame
            .components
            .iter()
            .enumerate()
            .map(|(c, component)| export_component(component, page, index, c))
            .collect(),
        page_index: frame.page_index,
    }
}

fn export_page(page: &Page, index: usize) -> GenerationPage {
    GenerationPage {
        id: index.to_string(),
        pinnable: page.pinnable,
        layout: page.layout,
        frames: page
            .frames
            .iter()
            .enumerate()
            .map(|(f, frame)| export_frame(frame, index, f))
            .collect(),
    }
}

/// Build the generation payload. Pure; the article is not modified.
pub fn generation_request(article: &Article) -> GenerationRequest {
    log::debug!(
        "Building generation request for {} ({} pages)",
        article.id,
        article.pages.len()
    );

    GenerationRequest {
        article_id: article.id.clone(),
        title: article.title.clone(),
        pages: article
            .pages
            .iter()
            .enumerate()
            .map(|(p, page)| export_page(page, p))
            .collect(),
    }
}
