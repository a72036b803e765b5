//! Source routing and file naming helpers.

use crate::error::{Error, Result};
use std::path::Path;

/// Maximum length (in characters) of a generated file name.
const MAX_FILENAME_LEN: usize = 100;

/// Characters never allowed in generated file names.
const UNSAFE_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Extensions handled by the word-processor collaborator.
const WORD_EXTENSIONS: &[&str] = &["docx", "doc"];

/// Extensions handled by the OCR collaborator.
const OCR_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "bmp", "tif", "tiff"];

/// Which collaborator produces the fragments for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Paragraphs and tables from a word-processor parser
    WordProcessor,
    /// Rendered text from an OCR engine
    Ocr,
}

impl SourceKind {
    /// Route by file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        if WORD_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::WordProcessor)
        } else if OCR_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Ocr)
        } else {
            None
        }
    }

    /// Route a source file by its extension.
    ///
    /// # Example
    /// ```
    /// use docnorm::detect::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_path("报告.DOCX").unwrap(), SourceKind::WordProcessor);
    /// assert_eq!(SourceKind::from_path("scan.tiff").unwrap(), SourceKind::Ocr);
    /// assert!(SourceKind::from_path("notes.txt").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedSource(path.display().to_string()))
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::WordProcessor => "docx",
            SourceKind::Ocr => "ocr",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if a path names an editor lock file (`~$` prefix).
pub fn is_temp_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("~$"))
}

/// Turn arbitrary text into a file name.
///
/// Removes `\ / * ? : " < > |`, replaces spaces with underscores and
/// truncates to 100 characters. Falls back to `untitled`.
pub fn safe_filename(text: &str) -> String {
    let safe: String = text
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_FILENAME_LEN)
        .collect();

    if safe.is_empty() {
        "untitled".to_string()
    } else {
        safe
    }
}
