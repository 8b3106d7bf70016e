//! Human-readable report rendering
//!
//! Output is deterministic: sections follow [`StatementKind::ALL`] order and
//! names are listed lexicographically.

use std::collections::BTreeSet;

use crate::parser::{CteAnalysis, ExtractionResult, StatementKind};
use crate::{CteFileReport, FileExtraction};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn push_name_section(lines: &mut Vec<String>, title: &str, names: &BTreeSet<String>) {
    lines.push(String::new());
    lines.push(format!("{} ({}):", title, names.len()));
    if names.is_empty() {
        lines.push("  (none)".to_string());
    }
    for name in names {
        lines.push(format!("  - {}", name));
    }
}

fn extraction_lines(result: &ExtractionResult, lines: &mut Vec<String>) {
    push_name_section(lines, "All tables", &result.all_tables);

    for kind in StatementKind::ALL {
        if let Some(names) = result.tables_for(kind) {
            push_name_section(lines, kind.label(), names);
        }
    }

    if !result.cte_tables.is_empty() {
        push_name_section(lines, "CTE tables (excluded)", &result.cte_tables);
    }
}

/// Render an extraction result.
pub fn format_extraction(result: &ExtractionResult) -> String {
    let mut lines = vec![rule(), "SQL table extraction".to_string(), rule()];
    extraction_lines(result, &mut lines);
    lines.push(rule());
    lines.join("\n")
}

/// Render the extraction result of one file, headed by its path.
pub fn format_file_extraction(file: &FileExtraction) -> String {
    let mut lines = vec![
        rule(),
        format!("SQL table extraction: {}", file.path.display()),
        rule(),
    ];
    extraction_lines(&file.result, &mut lines);
    lines.push(rule());
    lines.join("\n")
}

fn cte_lines(analysis: &CteAnalysis, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(format!("CTE names in order ({}):", analysis.total_count));
    if analysis.cte_names.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (i, name) in analysis.cte_names.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, name));
    }

    push_name_section(lines, "Unique CTE names", &analysis.unique_names);

    let repeated: Vec<String> = analysis
        .name_counts
        .iter()
        .filter(|(_, &count)| count > 1)
        .map(|(name, count)| format!("{} x{}", name, count))
        .collect();
    if !repeated.is_empty() {
        lines.push(String::new());
        lines.push(format!("Defined more than once: {}", repeated.join(", ")));
    }

    lines.push(String::new());
    lines.push(format!(
        "Total: {}, unique: {}, recursive: {}",
        analysis.total_count,
        analysis.unique_count,
        if analysis.has_recursive { "yes" } else { "no" }
    ));
}

/// Render a CTE analysis.
pub fn format_cte_analysis(analysis: &CteAnalysis) -> String {
    let mut lines = vec![rule(), "CTE analysis".to_string(), rule()];
    cte_lines(analysis, &mut lines);
    lines.push(rule());
    lines.join("\n")
}

/// Render the CTE analysis of one file, headed by its path.
pub fn format_cte_file_report(report: &CteFileReport) -> String {
    let mut lines = vec![
        rule(),
        format!("CTE analysis: {}", report.path.display()),
        rule(),
    ];
    cte_lines(&report.analysis, &mut lines);
    lines.push(rule());
    lines.join("\n")
}
