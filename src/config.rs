use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// One human-curated list of expected choice values.
///
/// Rendered verbatim at the end of the report so the operator can compare
/// it against the observed values by eye. The tool never diffs the two.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReferenceList {
    pub title: String,
    pub entries: Vec<String>,
}

/// Run configuration, loaded from a JSON file.
///
/// ```json
/// {
///   "encodings": ["utf-8", "utf-8-sig", "shift_jis", "cp932"],
///   "columns": ["category", "status"],
///   "references": [
///     { "title": "M_Equipment.Type", "entries": ["mechanical", "electrical"] }
///   ]
/// }
/// ```
///
/// Every field is optional; omitted fields take the defaults below.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Encoding labels to try, in order. First successful decode wins.
    pub encodings: Vec<String>,
    /// Column names whose distinct values are of interest. May repeat.
    pub columns: Vec<String>,
    /// Reference lists appended to the report for manual comparison.
    pub references: Vec<ReferenceList>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            encodings: default_encodings(),
            columns: Vec::new(),
            references: Vec::new(),
        }
    }
}

/// UTF-8 with and without a BOM, then the common Japanese legacy pair.
fn default_encodings() -> Vec<String> {
    ["utf-8", "utf-8-sig", "shift_jis", "cp932"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ProfileConfig {
    /// Read and parse a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ProfileConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        ensure!(
            !config.encodings.is_empty(),
            "config {}: 'encodings' must not be empty",
            path.display()
        );
        Ok(config)
    }
}
