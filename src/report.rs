use std::io::{self, Write};

use crate::config::ReferenceList;
use crate::data::model::{Table, TargetProfile};

const RULE: &str = "============================================================";

/// Render the full report.
///
/// Layout: encoding and size summary, the complete indexed header listing
/// (targets or not), one section per target occurrence with its sorted
/// distinct values, and finally the configured reference lists verbatim.
/// Everything the operator sees goes through `out`.
pub fn render(
    out: &mut impl Write,
    table: &Table,
    profiles: &[TargetProfile],
    references: &[ReferenceList],
) -> io::Result<()> {
    writeln!(out, "=== column value report ===")?;
    writeln!(out, "encoding: {}", table.encoding)?;
    writeln!(out, "data rows: {}", table.len())?;
    writeln!(out, "columns: {}", table.width())?;
    writeln!(out)?;

    writeln!(out, "--- all columns ---")?;
    for (index, name) in table.headers.iter().enumerate() {
        writeln!(out, "  [{index}] {name}")?;
    }
    writeln!(out)?;

    writeln!(out, "{RULE}")?;
    writeln!(out, "=== distinct values per target column ===")?;
    writeln!(out, "{RULE}")?;

    for profile in profiles {
        if profile.is_missing() {
            writeln!(out)?;
            writeln!(out, "> '{}': column not found", profile.name)?;
            continue;
        }
        for occurrence in &profile.occurrences {
            writeln!(out)?;
            writeln!(
                out,
                "> '{}' (column [{}], {})",
                profile.name, occurrence.index, occurrence.section
            )?;
            writeln!(out, "  distinct values: {}", occurrence.values.len())?;
            for value in &occurrence.values {
                writeln!(out, "    - {value}")?;
            }
        }
    }

    if !references.is_empty() {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "=== reference lists (for manual comparison) ===")?;
        writeln!(out, "{RULE}")?;
        for list in references {
            writeln!(out)?;
            writeln!(out, "--- {} ---", list.title)?;
            for entry in &list.entries {
                writeln!(out, "  - {entry}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::profile::profile_targets;

    fn sample_table() -> Table {
        Table {
            headers: vec!["A".into(), "B".into(), "A".into()],
            rows: vec![
                vec!["1".into(), "x".into(), "9".into()],
                vec!["2".into(), "".into(), "8".into()],
                vec!["".into(), "y".into(), "".into()],
            ],
            encoding: "shift_jis".into(),
        }
    }

    fn rendered(table: &Table, targets: &[&str], references: &[ReferenceList]) -> String {
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
        let profiles = profile_targets(table, &targets);
        let mut buf = Vec::new();
        render(&mut buf, table, &profiles, references).expect("render");
        String::from_utf8(buf).expect("utf-8 report")
    }

    #[test]
    fn summary_counts_match_the_table() {
        let table = sample_table();
        let text = rendered(&table, &["A"], &[]);

        assert!(text.contains("encoding: shift_jis"));
        assert!(text.contains(&format!("data rows: {}", table.len())));
        assert!(text.contains(&format!("columns: {}", table.width())));
    }

    #[test]
    fn every_header_is_listed_with_its_index() {
        let text = rendered(&sample_table(), &[], &[]);

        assert!(text.contains("  [0] A"));
        assert!(text.contains("  [1] B"));
        assert!(text.contains("  [2] A"));
    }

    #[test]
    fn one_section_per_occurrence() {
        let text = rendered(&sample_table(), &["A"], &[]);

        assert!(text.contains("> 'A' (column [0], first half)"));
        assert!(text.contains("> 'A' (column [2], second half)"));
        assert_eq!(text.matches("> 'A' (column [").count(), 2);
        assert!(text.contains("    - 1\n    - 2\n"));
        assert!(text.contains("    - 8\n    - 9\n"));
    }

    #[test]
    fn missing_target_gets_a_not_found_line_and_no_values() {
        let text = rendered(&sample_table(), &["C"], &[]);

        assert!(text.contains("> 'C': column not found"));
        assert!(!text.contains("> 'C' (column ["));
    }

    #[test]
    fn reference_lists_are_printed_verbatim() {
        let references = vec![
            ReferenceList {
                title: "M_Equipment.Type".into(),
                entries: vec!["mechanical".into(), "electrical".into()],
            },
            ReferenceList {
                title: "M_Equipment.Status".into(),
                entries: vec!["running".into()],
            },
        ];
        let text = rendered(&sample_table(), &["A"], &references);

        assert!(text.contains("--- M_Equipment.Type ---\n  - mechanical\n  - electrical\n"));
        assert!(text.contains("--- M_Equipment.Status ---\n  - running\n"));
    }

    #[test]
    fn reference_block_is_omitted_when_unconfigured() {
        let text = rendered(&sample_table(), &["A"], &[]);

        assert!(!text.contains("reference lists"));
    }
}
