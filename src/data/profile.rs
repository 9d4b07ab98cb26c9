use std::collections::BTreeSet;

use super::model::{ColumnProfile, HeaderSection, Table, TargetProfile};

// ---------------------------------------------------------------------------
// Occurrence discovery
// ---------------------------------------------------------------------------

/// Every header index whose name equals `target`, in header order.
///
/// Duplicate header names are real in concatenated exports, so the result
/// is a list of positions, never a single index.
pub fn occurrences(headers: &[String], target: &str) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() == target)
        .map(|(index, _)| index)
        .collect()
}

// ---------------------------------------------------------------------------
// Value collection
// ---------------------------------------------------------------------------

/// Distinct trimmed non-empty values under one header position.
///
/// Rows that end before `index` contribute nothing: a ragged row is not an
/// empty cell and not an error, it simply has no value there.
pub fn unique_values(rows: &[Vec<String>], index: usize) -> BTreeSet<String> {
    let mut values = BTreeSet::new();
    for row in rows {
        if let Some(cell) = row.get(index) {
            let trimmed = cell.trim();
            if !trimmed.is_empty() {
                values.insert(trimmed.to_string());
            }
        }
    }
    values
}

// ---------------------------------------------------------------------------
// Target profiling
// ---------------------------------------------------------------------------

/// Profile each configured target name against the table.
///
/// Targets are processed in configured order; a name listed twice is
/// profiled twice. Each matching header position gets its own
/// independently collected value set. A name with no match yields an
/// entry with no occurrences, which the report renders as "not found".
pub fn profile_targets(table: &Table, targets: &[String]) -> Vec<TargetProfile> {
    targets
        .iter()
        .map(|name| TargetProfile {
            name: name.clone(),
            occurrences: occurrences(&table.headers, name)
                .into_iter()
                .map(|index| ColumnProfile {
                    index,
                    section: HeaderSection::classify(index, table.width()),
                    values: unique_values(&table.rows, index),
                })
                .collect(),
        })
        .collect()
}
