use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::Document;

/// Reads one document per CSV row from a named text column.
///
/// An optional `name` column supplies document names; rows without one are
/// named `row-<n>` (1-based).
pub struct CsvIngestor {
    column: String,
}

impl CsvIngestor {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl super::Ingestor for CsvIngestor {
    fn ingest(&self, path: &Path) -> Result<Vec<Document>> {
        let mut reader = ::csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let headers = reader.headers()?.clone();
        let Some(text_idx) = headers.iter().position(|h| h == self.column) else {
            bail!(
                "{} has no '{}' column (found: {})",
                path.display(),
                self.column,
                headers.iter().collect::<Vec<_>>().join(", ")
            );
        };
        let name_idx = headers.iter().position(|h| h == "name");
        let source = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("csv")
            .to_string();

        let mut documents = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("{}: bad record {}", path.display(), i + 1))?;
            let text = record.get(text_idx).unwrap_or_default().to_string();
            let name = name_idx
                .and_then(|idx| record.get(idx))
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("row-{}", i + 1));
            documents.push(Document {
                name,
                source: source.clone(),
                text,
            });
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Ingestor;

    #[test]
    fn test_reads_named_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideas.csv");
        std::fs::write(
            &path,
            "id,description\n1,\"Solar, wind and waste\"\n2,Fast fashion\n",
        )
        .unwrap();

        let docs = CsvIngestor::new("description").ingest(&path).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "row-1");
        assert_eq!(docs[0].source, "ideas");
        assert_eq!(docs[0].text, "Solar, wind and waste");
    }

    #[test]
    fn test_uses_name_column_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideas.csv");
        std::fs::write(&path, "name,text\nEcoTech,renewable\n,blank name\n").unwrap();

        let docs = CsvIngestor::new("text").ingest(&path).unwrap();
        assert_eq!(docs[0].name, "EcoTech");
        assert_eq!(docs[1].name, "row-2");
    }

    #[test]
    fn test_missing_column_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideas.csv");
        std::fs::write(&path, "name,body\nx,y\n").unwrap();

        let err = CsvIngestor::new("text").ingest(&path).unwrap_err();
        assert!(err.to_string().contains("no 'text' column"));
    }
}
