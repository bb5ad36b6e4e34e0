//! File text extraction — the upstream collaborator boundary.
//!
//! Returns a single string per document or fails; everything downstream
//! operates on plain text only.

use onayscan_core::{Error, Result};
use std::path::Path;

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Pdf,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "text" => Self::PlainText,
            "pdf" => Self::Pdf,
            _ => Self::Unknown,
        }
    }
}

/// Extract text content from a file. `Ok(None)` means the file held no
/// extractable text; hard failures are extraction errors.
pub fn extract_text(path: &Path) -> Result<Option<String>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match FileType::from_extension(ext) {
        FileType::PlainText => {
            let content = std::fs::read_to_string(path)?;
            Ok(Some(content))
        }
        FileType::Pdf => extract_pdf(path),
        FileType::Unknown => {
            // Try reading as text
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let control = content
                        .chars()
                        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
                        .count();
                    if control > content.len() / 10 {
                        Ok(None) // Likely binary
                    } else {
                        Ok(Some(content))
                    }
                }
                Err(_) => Ok(None), // Binary file
            }
        }
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<Option<String>> {
    match pdf_extract::extract_text(path) {
        Ok(text) if text.trim().is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(e) => Err(Error::Extraction(format!(
            "PDF okunamadı ({}): {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<Option<String>> {
    tracing::warn!(
        "PDF support not compiled in (enable the 'pdf' feature): {}",
        path.display()
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("txt"), FileType::PlainText);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("bin"), FileType::Unknown);
    }

    #[test]
    fn test_extract_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.txt");
        std::fs::write(&path, "Toplam Alım Değeri 100 USD").unwrap();
        let text = extract_text(&path).unwrap().unwrap();
        assert!(text.contains("100 USD"));
    }
}
