use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Document;

/// Reads a single text file, or every `.txt` file directly inside a directory.
#[derive(Debug, Default)]
pub struct TextIngestor;

impl TextIngestor {
    pub fn new() -> Self {
        Self
    }
}

impl super::Ingestor for TextIngestor {
    fn ingest(&self, path: &Path) -> Result<Vec<Document>> {
        if path.is_dir() {
            let source = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("input")
                .to_string();

            let mut files: Vec<_> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to list {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
                })
                .collect();
            files.sort();

            if files.is_empty() {
                tracing::warn!(path = %path.display(), "directory contains no .txt files");
            }

            return files
                .iter()
                .map(|file| read_document(file, &source))
                .collect();
        }

        Ok(vec![read_document(path, &super::source_label(path))?])
    }
}

fn read_document(path: &Path, source: &str) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(Document {
        name,
        source: source.to_string(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Ingestor;

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        std::fs::create_dir(&reports).unwrap();
        let file = reports.join("sdg.txt");
        std::fs::write(&file, "Climate action").unwrap();

        let docs = TextIngestor::new().ingest(&file).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "sdg.txt");
        assert_eq!(docs[0].source, "reports");
        assert_eq!(docs[0].text, "Climate action");
    }

    #[test]
    fn test_directory_reads_only_txt_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let gri = dir.path().join("gri");
        std::fs::create_dir(&gri).unwrap();
        std::fs::write(gri.join("b.txt"), "second").unwrap();
        std::fs::write(gri.join("a.txt"), "first").unwrap();
        std::fs::write(gri.join("notes.md"), "ignored").unwrap();
        std::fs::create_dir(gri.join("nested")).unwrap();

        let docs = TextIngestor::new().ingest(&gri).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert!(docs.iter().all(|d| d.source == "gri"));
    }

    #[test]
    fn test_directory_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let sdg = dir.path().join("sdg");
        std::fs::create_dir(&sdg).unwrap();
        std::fs::write(sdg.join("REPORT.TXT"), "climate").unwrap();
        std::fs::write(sdg.join("notes.Txt"), "audit").unwrap();

        let docs = TextIngestor::default().ingest(&sdg).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["REPORT.TXT", "notes.Txt"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextIngestor::new()
            .ingest(&dir.path().join("missing.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
