use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;

use super::model::Table;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of [`load_table`].
///
/// `Undecodable` is the one condition the CLI maps to its own exit status;
/// everything else is an ordinary fatal error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown encoding label '{0}' in configuration")]
    BadEncodingLabel(String),

    #[error("none of the configured encodings ({tried}) can decode {path}")]
    Undecodable { path: String, tried: String },

    #[error("malformed CSV in {path} (decoded as {encoding}): {source}")]
    Csv {
        path: String,
        encoding: String,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Encoding candidates
// ---------------------------------------------------------------------------

/// One entry of the configured trial list, resolved to a concrete decoder.
struct Candidate<'a> {
    /// The label as configured; recorded in the [`Table`] on success.
    label: &'a str,
    encoding: &'static Encoding,
    /// Drop a leading UTF-8 BOM before decoding (the `utf-8-sig` variant).
    strip_bom: bool,
}

/// Resolve a configured label to a decoder.
///
/// Labels go through the WHATWG label table, with two aliases the table
/// does not know: `utf-8-sig` (UTF-8 with an optional BOM stripped first;
/// plain `utf-8` keeps a BOM as U+FEFF text) and `cp932` (windows-31j).
fn resolve_candidate(label: &str) -> Option<Candidate<'_>> {
    let lowered = label.to_ascii_lowercase();
    if matches!(lowered.as_str(), "utf-8-sig" | "utf_8_sig") {
        return Some(Candidate {
            label,
            encoding: UTF_8,
            strip_bom: true,
        });
    }
    let canonical = match lowered.as_str() {
        "cp932" => "windows-31j",
        other => other,
    };
    Encoding::for_label(canonical.as_bytes()).map(|encoding| Candidate {
        label,
        encoding,
        strip_bom: false,
    })
}

/// Strict decode: `Some` only if the whole input decodes with no error.
/// No replacement characters are ever produced: the input either decodes
/// fully or the candidate is rejected.
fn try_decode<'a>(bytes: &'a [u8], candidate: &Candidate<'_>) -> Option<Cow<'a, str>> {
    let bytes = if candidate.strip_bom {
        bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes)
    } else {
        bytes
    };
    candidate
        .encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV file whose text encoding is unknown in advance.
///
/// The configured encoding labels are tried in order; the first one that
/// decodes the entire file without error wins and is recorded in the
/// returned [`Table`]. Decoding success is purely "no decode error": a
/// wrong-but-decodable encoding is accepted, which is a known limitation
/// of trial-order detection.
///
/// The decoded text is then parsed as comma-separated, double-quote-escaped
/// CSV in flexible mode: the first record becomes the header, every later
/// record a data row, and rows shorter or longer than the header are kept
/// as-is. A CSV structural error is *not* an encoding failure and does not
/// fall through to the next candidate.
pub fn load_table(path: &Path, encodings: &[String]) -> Result<Table, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    // Resolve every label up front so a configuration typo fails before
    // any trial, independent of which candidate would have matched.
    let candidates = encodings
        .iter()
        .map(|label| {
            resolve_candidate(label).ok_or_else(|| LoadError::BadEncodingLabel(label.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for candidate in &candidates {
        let Some(text) = try_decode(&bytes, candidate) else {
            log::debug!(
                "{}: does not decode as {}, trying next candidate",
                path.display(),
                candidate.label
            );
            continue;
        };

        let table = parse_csv(&text, candidate.label).map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            encoding: candidate.label.to_string(),
            source,
        })?;
        log::info!(
            "{}: {} data rows, {} columns (decoded as {})",
            path.display(),
            table.len(),
            table.width(),
            candidate.label
        );
        return Ok(table);
    }

    Err(LoadError::Undecodable {
        path: path.display().to_string(),
        tried: encodings.join(", "),
    })
}

fn parse_csv(text: &str, encoding: &str) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Table {
        headers,
        rows,
        encoding: encoding.to_string(),
    })
}
