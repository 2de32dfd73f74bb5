//! Feature and label CSV files built from scored documents.
//!
//! The feature file has one row per document with the three category counts.
//! Labelling adds `total_esg` and `sustainability_label` columns computed with
//! the same thresholds as [`classify`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::esg::classifier::classify;
use crate::esg::keywords::KeywordIndex;
use crate::esg::scorer::score;
use crate::models::{Document, Rating};

const TOTAL_COLUMN: &str = "total_esg";
const LABEL_COLUMN: &str = "sustainability_label";
const SCORE_COLUMNS: [&str; 3] = ["env_score", "soc_score", "gov_score"];

#[derive(Debug, Serialize)]
struct FeatureRow<'a> {
    document: &'a str,
    source: &'a str,
    env_score: u64,
    soc_score: u64,
    gov_score: u64,
}

#[derive(Debug, Serialize)]
struct LabeledRow<'a> {
    document: &'a str,
    source: &'a str,
    env_score: u64,
    soc_score: u64,
    gov_score: u64,
    total_esg: u64,
    sustainability_label: Rating,
}

/// Score every document and write the feature CSV. Returns the row count.
pub fn write_features(
    index: &KeywordIndex,
    documents: &[Document],
    output: &Path,
    with_labels: bool,
) -> Result<usize> {
    let mut writer = ::csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    for doc in documents {
        let v = score(index, &doc.text);
        if with_labels {
            writer.serialize(LabeledRow {
                document: &doc.name,
                source: &doc.source,
                env_score: v.environment,
                soc_score: v.social,
                gov_score: v.governance,
                total_esg: v.total(),
                sustainability_label: classify(v.total()),
            })?;
        } else {
            writer.serialize(FeatureRow {
                document: &doc.name,
                source: &doc.source,
                env_score: v.environment,
                soc_score: v.social,
                gov_score: v.governance,
            })?;
        }
    }

    writer.flush()?;
    Ok(documents.len())
}

/// Add (or recompute) `total_esg` and `sustainability_label` for every row of
/// an existing feature CSV. Other columns pass through untouched.
pub fn label_features(input: &Path, output: &Path) -> Result<Vec<(String, u64, Rating)>> {
    let mut reader = ::csv::Reader::from_path(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let headers = reader.headers()?.clone();

    let mut score_idx = [0usize; 3];
    for (slot, column) in score_idx.iter_mut().zip(SCORE_COLUMNS) {
        match headers.iter().position(|h| h == column) {
            Some(idx) => *slot = idx,
            None => bail!("{} has no '{}' column", input.display(), column),
        }
    }
    let doc_idx = headers.iter().position(|h| h == "document");

    // Drop stale derived columns so relabelling is idempotent.
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h != TOTAL_COLUMN && *h != LABEL_COLUMN)
        .map(|(i, _)| i)
        .collect();

    let mut out_headers: Vec<&str> = keep.iter().filter_map(|&i| headers.get(i)).collect();
    out_headers.push(TOTAL_COLUMN);
    out_headers.push(LABEL_COLUMN);

    // Read everything first: output may be the input file.
    let mut rows = Vec::new();
    let mut summary = Vec::new();
    for (n, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: bad record {}", input.display(), n + 1))?;

        let mut total = 0u64;
        for (&idx, column) in score_idx.iter().zip(SCORE_COLUMNS) {
            let raw = record.get(idx).unwrap_or_default().trim();
            let value: u64 = raw.parse().with_context(|| {
                format!("{}: row {} has non-integer {} '{}'", input.display(), n + 1, column, raw)
            })?;
            total = total.checked_add(value).with_context(|| {
                format!("{}: row {} score total overflows", input.display(), n + 1)
            })?;
        }
        let rating = classify(total);

        let mut fields: Vec<String> = keep
            .iter()
            .map(|&i| record.get(i).unwrap_or_default().to_string())
            .collect();
        fields.push(total.to_string());
        fields.push(rating.to_string());
        rows.push(fields);

        let document = doc_idx
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", n + 1));
        summary.push((document, total, rating));
    }

    let mut writer = ::csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writer.write_record(&out_headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(summary)
}
