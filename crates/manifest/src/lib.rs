//! # Stowage Manifest
//!
//! Lenient JSON cargo manifest importer.
//!
//! The persisted manifest format is an array of objects with the keys
//! `{name, qty, l, w, h, weight, unstackable}`, centimetres and
//! kilograms. Manifests frequently arrive embedded in free-form text
//! (assistant output, pasted notes), so extraction is forgiving: fenced
//! code blocks are preferred, a raw top-level array is accepted, and as a
//! last resort the first-to-last bracket span is scanned.

use serde::Deserialize;
use stowage_core::{CargoSpec, Error, Result};

/// One manifest entry as persisted.
#[derive(Debug, Clone, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default = "default_qty")]
    qty: usize,
    l: f64,
    w: f64,
    h: f64,
    weight: f64,
    #[serde(default)]
    unstackable: bool,
}

fn default_qty() -> usize {
    1
}

/// Parses cargo specs out of free-form text containing a JSON manifest.
///
/// Candidate JSON spans are tried in order: every fenced code block, the
/// whole trimmed input, then the outermost bracket span. The first span
/// that parses as a manifest array wins. Ids are derived from the entry
/// names and are unique within the returned list.
pub fn parse_manifest(input: &str) -> Result<Vec<CargoSpec>> {
    for candidate in candidate_spans(input) {
        if let Ok(entries) = serde_json::from_str::<Vec<ManifestEntry>>(candidate.trim()) {
            return build_specs(entries);
        }
    }
    Err(Error::InvalidCargo(
        "no cargo manifest array found in input".into(),
    ))
}

/// Candidate JSON spans, most trustworthy first.
fn candidate_spans(input: &str) -> Vec<&str> {
    let mut spans = Vec::new();

    // Fenced code blocks, with or without a language tag.
    let mut rest = input;
    while let Some(open) = rest.find("```") {
        let after_fence = &rest[open + 3..];
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        match body.find("```") {
            Some(close) => {
                spans.push(&body[..close]);
                rest = &body[close + 3..];
            }
            None => break,
        }
    }

    // The whole input as a raw array.
    spans.push(input);

    // Last resort: outermost bracket span.
    if let (Some(open), Some(close)) = (input.find('['), input.rfind(']')) {
        if open < close {
            spans.push(&input[open..=close]);
        }
    }

    spans
}

fn build_specs(entries: Vec<ManifestEntry>) -> Result<Vec<CargoSpec>> {
    let mut specs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let spec = CargoSpec::new(
            format!("{}-{}", slug(&entry.name), index + 1),
            entry.name,
            entry.l,
            entry.w,
            entry.h,
            entry.weight,
        )
        .with_quantity(entry.qty)
        .with_unstackable(entry.unstackable);
        spec.validate()?;
        specs.push(spec);
    }
    Ok(specs)
}

/// Lowercase alphanumeric slug of a name; empty names become "cargo".
fn slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "cargo".into()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"[
        {"name": "Euro pallet", "qty": 4, "l": 120, "w": 80, "h": 144, "weight": 350},
        {"name": "Fridge", "qty": 2, "l": 70, "w": 70, "h": 180, "weight": 90, "unstackable": true}
    ]"#;

    #[test]
    fn test_parse_raw_array() {
        let specs = parse_manifest(PLAIN).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id, "euro-pallet-1");
        assert_eq!(specs[0].quantity, 4);
        assert_eq!(specs[0].length, 120.0);
        assert!(specs[1].unstackable);
    }

    #[test]
    fn test_parse_fenced_block() {
        let input = format!(
            "Here is the cargo list you asked for:\n```json\n{}\n```\nLet me know!",
            PLAIN
        );
        let specs = parse_manifest(&input).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].name, "Fridge");
    }

    #[test]
    fn test_parse_bare_fence() {
        let input = format!("```\n{}\n```", PLAIN);
        let specs = parse_manifest(&input).unwrap();
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_bracket_scan_fallback() {
        let input = format!("The manifest {} should work.", PLAIN);
        let specs = parse_manifest(&input).unwrap();
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_defaults() {
        let specs =
            parse_manifest(r#"[{"name": "Box", "l": 50, "w": 40, "h": 30, "weight": 8}]"#)
                .unwrap();
        assert_eq!(specs[0].quantity, 1);
        assert!(!specs[0].unstackable);
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let specs = parse_manifest(
            r#"[
                {"name": "Box", "l": 50, "w": 40, "h": 30, "weight": 8},
                {"name": "Box", "l": 60, "w": 40, "h": 30, "weight": 9}
            ]"#,
        )
        .unwrap();
        assert_eq!(specs[0].id, "box-1");
        assert_eq!(specs[1].id, "box-2");
    }

    #[test]
    fn test_invalid_dimensions_error() {
        let result =
            parse_manifest(r#"[{"name": "Bad", "l": -5, "w": 40, "h": 30, "weight": 8}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_manifest_is_an_error() {
        assert!(parse_manifest("nothing to see here").is_err());
        assert!(parse_manifest("").is_err());
    }

    #[test]
    fn test_unicode_name_slug() {
        let specs = parse_manifest(
            r#"[{"name": "Kühlschrank 3000", "l": 70, "w": 70, "h": 180, "weight": 90}]"#,
        )
        .unwrap();
        assert_eq!(specs[0].id, "k-hlschrank-3000-1");
        assert_eq!(specs[0].name, "Kühlschrank 3000");
    }
}
