//! Turn files on disk into [`Document`]s for scoring.
//!
//! - [`text`] — a `.txt` file or a directory of them.
//! - [`tabular`] — a CSV file with one document per row.

use std::path::Path;

use anyhow::Result;

use crate::models::Document;

pub mod tabular;
pub mod text;

pub trait Ingestor {
    fn ingest(&self, path: &Path) -> Result<Vec<Document>>;
}

/// Pick an ingestor by extension and read every path in order.
pub fn ingest_paths(paths: &[std::path::PathBuf], csv_column: &str) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        let docs = if is_csv {
            tabular::CsvIngestor::new(csv_column).ingest(path)?
        } else {
            text::TextIngestor::new().ingest(path)?
        };

        tracing::info!(path = %path.display(), documents = docs.len(), "ingested");
        documents.extend(docs);
    }
    Ok(documents)
}

/// Label used for the `source` column: the parent directory name.
fn source_label(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_paths_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("a.txt");
        let csv = dir.path().join("b.CSV");
        std::fs::write(&txt, "carbon").unwrap();
        std::fs::write(&csv, "name,text\nx,job\ny,audit\n").unwrap();

        let docs = ingest_paths(&[txt, csv], "text").unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].text, "carbon");
        assert_eq!(docs[1].name, "x");
        assert_eq!(docs[2].text, "audit");
    }
}
