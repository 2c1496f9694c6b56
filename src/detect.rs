//! Input sniffing and discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Kinds of batch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// PDF documents for outline extraction
    Pdf,
    /// JSON collection descriptions for relevance ranking
    CollectionJson,
}

impl InputKind {
    /// File extension for this kind, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            InputKind::Pdf => "pdf",
            InputKind::CollectionJson => "json",
        }
    }

    fn matches(self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(self.extension()))
    }
}

/// Check that bytes start with a PDF header, returning the version (e.g. "1.7").
pub fn check_pdf_header(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    match rest {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(format!("{}.{}", *major as char, *minor as char))
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    check_pdf_header(data).is_ok()
}

/// List the input files of `kind` directly inside `dir`, sorted by file name.
///
/// Returns [`Error::NoInputs`] when the directory is missing or nothing matches.
pub fn discover_inputs(dir: &Path, kind: InputKind) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NoInputs(dir.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| kind.matches(path))
        .collect();

    if files.is_empty() {
        return Err(Error::NoInputs(dir.to_path_buf()));
    }

    files.sort();
    log::info!("Found {} {} files in {}", files.len(), kind.extension(), dir.display());
    Ok(files)
}
