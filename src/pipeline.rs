use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::archiver;
use crate::error::Result;
use crate::fetcher::ProductFinder;
use crate::gemini::TextGenerator;
use crate::writer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FindProduct,
    GenerateKeywords,
    WriteArticle,
    Publish,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::FindProduct => "find product",
            Step::GenerateKeywords => "generate keywords",
            Step::WriteArticle => "write article",
            Step::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// Logs a failed step once and tags it, so the caller only needs to stop.
fn at_step<T>(step: Step, result: Result<T>) -> std::result::Result<T, Step> {
    result.map_err(|e| {
        error!("[{step}] {e}");
        step
    })
}

/// Runs the four steps in order. Each step's output feeds the next and the
/// first failure stops the run; on failure the step that failed is returned.
pub fn run(
    finder: &dyn ProductFinder,
    model: &dyn TextGenerator,
    output_dir: &Path,
    query: &str,
) -> std::result::Result<PathBuf, Step> {
    info!("Step 1: Finding a trending product for query: '{query}'...");
    let product = at_step(Step::FindProduct, finder.find_product(query))?;
    info!("-> Found product: {} from {}", product.title, product.source);

    info!("Step 2: Generating SEO keywords...");
    let keywords = at_step(Step::GenerateKeywords, writer::generate_keywords(model, &product))?;
    info!("-> Keywords generated: {}", keywords.join(", "));

    info!("Step 3: Writing blog post...");
    let article = at_step(Step::WriteArticle, writer::write_article(model, &product, &keywords))?;
    info!("-> Blog post written ({} words)", article.split_whitespace().count());

    info!("Step 4: Saving blog post as a Markdown file...");
    let path = at_step(Step::Publish, archiver::save_markdown(output_dir, &product, &article))?;
    info!("Blog post saved as '{}'", path.display());
    info!("Copy the file into Medium, WordPress, or any other platform.");

    Ok(path)
}
