//! Knowledge base directory scanning

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;

static CRLF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Read all eligible documents from the knowledge base directory.
///
/// Returns `(filename, raw content)` pairs sorted by filename. Files whose
/// name starts with `00_` carry boundary/scope notes and are excluded so they
/// cannot pollute retrieval.
pub fn read_kb_files(kb_dir: &Path) -> Result<Vec<(String, String)>> {
    let mut docs = Vec::new();

    for entry in WalkDir::new(kb_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if name.to_lowercase().starts_with("00_") {
            tracing::debug!("Skipping boundary document: {}", name);
            continue;
        }
        let content = std::fs::read_to_string(path)?;
        docs.push((name.to_string(), content));
    }

    docs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(docs)
}

/// Normalize raw document text: CRLF to LF, collapse runs of blank lines, trim.
pub fn clean_text(text: &str) -> String {
    let text = CRLF.replace_all(text, "\n");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}
