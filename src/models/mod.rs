//! Document model for scrolly articles
//!
//! article -> pages -> frames -> components, plus the layout catalog that
//! decides which slots a frame has and the focus pointer used by the
//! preview.

pub mod article;
pub mod component;
pub mod focus;
pub mod frame;
pub mod layout;
pub mod page;
pub mod serde_helpers;

// Re-export commonly used types
pub use article::{Article, Placeholder};
pub use component::{
    Component, ComponentContent, ComponentType, HtmlMetadata, ImageMetadata, ModelError,
    TextMetadata,
};
pub use focus::{FocusDebouncer, FocusPointer};
pub use frame::{create_frame, Frame};
pub use layout::{slot_order, slots_for, Layout, LayoutTemplate, Position, LAYOUT_TEMPLATES};
pub use page::{create_page, Page};
