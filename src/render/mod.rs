//! Markdown-dialect rendering and label color helpers.

pub mod color;
pub mod markdown;

pub use color::{contrast_color, label_color};
pub use markdown::markdown_to_html;
