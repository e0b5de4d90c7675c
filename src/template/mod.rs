use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::page::BlogContent;

pub const LAST_UPDATED: &str = "{{LAST_UPDATED}}";
pub const TAG_FILTERS: &str = "{{TAG_FILTERS}}";
pub const BLOG_CONTENT: &str = "{{BLOG_CONTENT}}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// "Last updated" stamp, e.g. "1/5/2024, 3:45:07 PM UTC".
pub fn last_updated(now: &DateTime<Utc>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p UTC").to_string()
}

/// Substitute the generated fragments into `template`.
///
/// Each placeholder is replaced at its first occurrence in the template only;
/// a missing placeholder is skipped and everything else passes through
/// untouched. Placeholders inside the injected fragments are never expanded.
pub fn fill(template: &str, content: &BlogContent, updated: &str) -> String {
    let mut slots: Vec<(usize, &str, &str)> = [
        (LAST_UPDATED, updated),
        (TAG_FILTERS, content.tag_filters.as_str()),
        (BLOG_CONTENT, content.blog_content.as_str()),
    ]
    .into_iter()
    .filter_map(|(placeholder, fragment)| match template.find(placeholder) {
        Some(at) => Some((at, placeholder, fragment)),
        None => {
            debug!(placeholder, "placeholder not found in template");
            None
        }
    })
    .collect();
    slots.sort_by_key(|&(at, _, _)| at);

    let mut page = String::with_capacity(template.len() + updated.len() + content.blog_content.len());
    let mut cursor = 0;
    for (at, placeholder, fragment) in slots {
        page.push_str(&template[cursor..at]);
        page.push_str(fragment);
        cursor = at + placeholder.len();
    }
    page.push_str(&template[cursor..]);
    page
}

#[instrument]
pub fn read(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the finished page, replacing any previous output.
#[instrument(skip(page), fields(bytes = page.len()))]
pub fn write(path: &Path, page: &str) -> Result<(), TemplateError> {
    std::fs::write(path, page).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
