//! JSON result document writer

use crate::output::types::ScrapeResult;
use std::path::{Path, PathBuf};

/// Renders the result document as pretty-printed JSON
pub fn to_json_string(result: &ScrapeResult) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(&result.document())?)
}

/// Writes the result document to `path`, creating parent directories
///
/// # Arguments
///
/// * `result` - The scrape result to write
/// * `path` - Destination file; overwritten if it exists
pub fn write_result(result: &ScrapeResult, path: &Path) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = to_json_string(result)?;
    std::fs::write(path, json)?;

    tracing::info!(
        "Wrote {} products to {}",
        result.total_products(),
        path.display()
    );

    Ok(())
}

/// Output path used when none is given: `data/products_<category>.json`
///
/// Path separators in the category are replaced with `_` so the file
/// always lands directly inside `data/`.
pub fn default_output_path(category: &str) -> PathBuf {
    let file_stem: String = category
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    Path::new("data").join(format!("products_{}.json", file_stem))
}
