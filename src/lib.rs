//! rust-sqltables: CTE-aware table reference extraction for SQL text
//!
//! This library scans SQL (standalone `.sql` files, or SQL embedded in
//! Python and shell scripts) for the tables it touches, separating real
//! tables from names introduced by `WITH` clauses. It does not parse SQL:
//! extraction is keyword-anchored and best-effort.

pub mod error;
pub mod parser;
pub mod report;
pub mod source;
mod util;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

pub use error::SqlTablesError;
pub use parser::{CteAnalysis, ExtractionResult, StatementKind};
pub use source::{SourceFile, SourceKind};

/// Options for a scan over files and directories
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Files or directories to scan
    pub inputs: Vec<PathBuf>,
    /// Glob patterns of paths to skip
    pub exclude: Vec<String>,
    /// Enable verbose output
    pub verbose: bool,
}

/// Tables extracted from one input file
#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub result: ExtractionResult,
}

/// CTE analysis of one input file
#[derive(Debug, Clone)]
pub struct CteFileReport {
    pub path: PathBuf,
    pub analysis: CteAnalysis,
}

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Extract tables from a single file.
///
/// Host-language lines are stripped first for `.py` and `.sh` files.
pub fn extract_file(path: &Path) -> Result<FileExtraction> {
    let source = source::load_source(path)?;
    let result = parser::extract_tables(&source.content, source.kind.strips_host_code());

    Ok(FileExtraction {
        path: source.path,
        kind: source.kind,
        result,
    })
}

/// Analyze CTE definitions in a single file.
pub fn analyze_cte_file(path: &Path) -> Result<CteFileReport> {
    let source = source::load_source(path)?;
    let content = if source.kind.strips_host_code() {
        parser::strip_host_code(&source.content)
    } else {
        source.content
    };

    Ok(CteFileReport {
        path: source.path,
        analysis: parser::analyze_ctes(&content),
    })
}

/// Run `f` over every file, in parallel for larger file sets.
///
/// Results keep the input order; the first error is propagated.
fn process_files<T, F>(files: &[PathBuf], f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    if files.len() >= PARALLEL_THRESHOLD {
        files.par_iter().map(|file| f(file.as_path())).collect()
    } else {
        files.iter().map(|file| f(file.as_path())).collect()
    }
}

/// Extract tables from multiple files.
pub fn extract_files(files: &[PathBuf]) -> Result<Vec<FileExtraction>> {
    process_files(files, extract_file)
}

/// Analyze CTE definitions in multiple files.
pub fn analyze_cte_files(files: &[PathBuf]) -> Result<Vec<CteFileReport>> {
    process_files(files, analyze_cte_file)
}

/// Collect input files and extract their tables
pub fn scan(options: &ScanOptions) -> Result<Vec<FileExtraction>> {
    let files = source::collect_source_files(&options.inputs, &options.exclude)?;

    if options.verbose {
        println!("Found {} input files", files.len());
    }

    let extractions = extract_files(&files)?;

    if options.verbose {
        for extraction in &extractions {
            println!(
                "Scanned {}: {} tables, {} CTEs",
                extraction.path.display(),
                extraction.result.all_tables.len(),
                extraction.result.cte_tables.len()
            );
        }
    }

    Ok(extractions)
}

/// Collect input files and analyze their CTE definitions
pub fn scan_ctes(options: &ScanOptions) -> Result<Vec<CteFileReport>> {
    let files = source::collect_source_files(&options.inputs, &options.exclude)?;

    if options.verbose {
        println!("Found {} input files", files.len());
    }

    let reports = analyze_cte_files(&files)?;

    if options.verbose {
        let total: usize = reports.iter().map(|r| r.analysis.total_count).sum();
        println!("Found {} CTE definitions", total);
    }

    Ok(reports)
}

/// Union the results of several files into one.
pub fn merge_extractions(extractions: &[FileExtraction]) -> ExtractionResult {
    extractions
        .iter()
        .fold(ExtractionResult::default(), |mut merged, extraction| {
            merged.merge(&extraction.result);
            merged
        })
}
