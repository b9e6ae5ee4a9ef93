use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::ProductInfo;

const FALLBACK_STEM: &str = "untitled-product";

/// Keeps alphanumerics, spaces, underscores and hyphens from `title`, then
/// trims trailing whitespace and appends `.md`.
pub fn safe_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let stem = stem.trim_end();

    if stem.is_empty() {
        format!("{FALLBACK_STEM}.md")
    } else {
        format!("{stem}.md")
    }
}

pub fn render_markdown(product: &ProductInfo, article: &str) -> String {
    format!(
        "{article}\n\n---\n\n**Find it here:** [{}]({})",
        product.title, product.link
    )
}

/// Writes the article into `dir`, replacing any earlier file for the same title.
pub fn save_markdown(dir: &Path, product: &ProductInfo, article: &str) -> Result<PathBuf> {
    let path = dir.join(safe_file_name(&product.title));
    fs::write(&path, render_markdown(product, article)).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
