//! Input sources: kind dispatch, decoding and file discovery

use std::path::{Path, PathBuf};

use anyhow::Result;
use encoding_rs::WINDOWS_1252;

use crate::error::SqlTablesError;

/// Recognised input kinds, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `.sql`: pure SQL
    Sql,
    /// `.py`: SQL embedded in Python string literals
    Python,
    /// `.sh`: SQL embedded in shell scripts
    Shell,
}

impl SourceKind {
    /// Determine the kind from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "sql" => Some(SourceKind::Sql),
            "py" => Some(SourceKind::Python),
            "sh" => Some(SourceKind::Shell),
            _ => None,
        }
    }

    /// Whether host-language lines must be stripped before extraction.
    pub fn strips_host_code(self) -> bool {
        matches!(self, SourceKind::Python | SourceKind::Shell)
    }
}

/// A decoded input file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub content: String,
}

/// Read a file as a string, trying UTF-8 first, then Windows-1252 as fallback
fn read_file_with_encoding_fallback(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Load and decode one input file.
///
/// # Errors
/// - [`SqlTablesError::SourceNotFound`] if the path does not exist
/// - [`SqlTablesError::UnsupportedSourceKind`] if the extension is not `.sql`, `.py` or `.sh`
/// - [`SqlTablesError::SourceReadError`] if the file cannot be read
pub fn load_source(path: &Path) -> Result<SourceFile> {
    if !path.exists() {
        return Err(SqlTablesError::SourceNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let kind = SourceKind::from_path(path).ok_or_else(|| SqlTablesError::UnsupportedSourceKind {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_ascii_lowercase()))
            .unwrap_or_default(),
    })?;

    let content =
        read_file_with_encoding_fallback(path).map_err(|e| SqlTablesError::SourceReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Strip UTF-8 BOM if present
    let content = match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    };

    Ok(SourceFile {
        path: path.to_path_buf(),
        kind,
        content,
    })
}

/// Expand inputs into a sorted list of files to scan.
///
/// Directories are walked recursively and only recognised extensions are kept.
/// File inputs are kept as given so that missing or unsupported files are
/// reported when loaded. Paths matching any `exclude` glob are dropped.
pub fn collect_source_files(inputs: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let patterns = exclude
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|source| SqlTablesError::InvalidExcludePattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in walkdir::WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if entry.file_type().is_file() && SourceKind::from_path(path).is_some() {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    files.retain(|file| !patterns.iter().any(|pattern| pattern.matches_path(file)));
    files.sort();
    files.dedup();

    Ok(files)
}
