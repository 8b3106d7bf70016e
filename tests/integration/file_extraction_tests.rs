//! Integration tests for single-file extraction

use pretty_assertions::assert_eq;

use rust_sqltables::{analyze_cte_file, extract_file, SourceKind, SqlTablesError, StatementKind};

use crate::common::{names, TestContext};

// ============================================================================
// .sql files
// ============================================================================

#[test]
fn test_sql_file_extraction() {
    let ctx = TestContext::with_fixture("mixed_project");
    let extraction = extract_file(&ctx.path("queries/sample_queries.sql")).unwrap();
    let result = &extraction.result;

    assert_eq!(extraction.kind, SourceKind::Sql);
    assert_eq!(
        result.all_tables,
        names(&[
            "customers",
            "daily_revenue",
            "employees",
            "orders",
            "staging_orders",
            "temp_cache",
        ])
    );
    assert_eq!(result.cte_tables, names(&["employee_tree", "team_sizes"]));
    assert_eq!(
        result.tables_for(StatementKind::SelectFrom),
        Some(&names(&["employees", "orders"]))
    );
    assert_eq!(
        result.tables_for(StatementKind::Create),
        Some(&names(&["daily_revenue"]))
    );
    assert_eq!(
        result.tables_for(StatementKind::Drop),
        Some(&names(&["temp_cache"]))
    );
    // The only JOIN target is a CTE, so the kind is omitted entirely.
    assert_eq!(result.tables_for(StatementKind::Join), None);
}

#[test]
fn test_commented_out_table_not_reported() {
    let ctx = TestContext::with_fixture("mixed_project");
    let extraction = extract_file(&ctx.path("queries/sample_queries.sql")).unwrap();
    assert!(!extraction.result.all_tables.contains("legacy_backup"));
}

#[test]
fn test_sql_file_keeps_hash_lines() {
    // Host stripping only applies to scripts.
    let ctx = TestContext::empty();
    let path = ctx.write("q.sql", "#temp\nSELECT * FROM t");
    let extraction = extract_file(&path).unwrap();
    assert_eq!(extraction.result.all_tables, names(&["t"]));
}

// ============================================================================
// Host files
// ============================================================================

#[test]
fn test_python_file_extraction() {
    let ctx = TestContext::with_fixture("mixed_project");
    let extraction = extract_file(&ctx.path("scripts/etl_job.py")).unwrap();
    let result = &extraction.result;

    assert_eq!(extraction.kind, SourceKind::Python);
    assert_eq!(
        result.all_tables,
        names(&[
            "action_logs",
            "inventory",
            "order_items",
            "orders",
            "products",
            "temp_cache",
            "users",
        ])
    );
    assert_eq!(result.cte_tables, names(&["sales_summary"]));
    assert_eq!(result.tables_for(StatementKind::Join), Some(&names(&["orders"])));
    assert_eq!(
        result.tables_for(StatementKind::Update),
        Some(&names(&["inventory"]))
    );
    assert!(!result.all_tables.contains("legacy_table"));
}

#[test]
fn test_shell_file_extraction() {
    let ctx = TestContext::with_fixture("mixed_project");
    let extraction = extract_file(&ctx.path("scripts/refresh.sh")).unwrap();
    let result = &extraction.result;

    assert_eq!(extraction.kind, SourceKind::Shell);
    assert_eq!(
        result.all_tables,
        names(&["orders", "refunds", "snapshot_orders"])
    );
    assert_eq!(
        result.tables_for(StatementKind::Truncate),
        Some(&names(&["snapshot_orders"]))
    );
    assert!(!result.all_tables.contains("ghost_table"));
}

// ============================================================================
// Boundary errors
// ============================================================================

#[test]
fn test_missing_file_is_resource_not_found() {
    let ctx = TestContext::empty();
    let err = extract_file(&ctx.path("missing.sql")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SqlTablesError>(),
        Some(SqlTablesError::SourceNotFound { .. })
    ));
}

#[test]
fn test_unsupported_extension() {
    let ctx = TestContext::with_fixture("mixed_project");
    let err = extract_file(&ctx.path("notes.txt")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SqlTablesError>(),
        Some(SqlTablesError::UnsupportedSourceKind { .. })
    ));
    assert!(err.to_string().contains(".txt"));
}

#[test]
fn test_malformed_sql_is_not_an_error() {
    let ctx = TestContext::empty();
    let path = ctx.write("broken.sql", "WITH x AS (SELECT * FROM y");
    let extraction = extract_file(&path).unwrap();
    assert_eq!(extraction.result.cte_tables, names(&["x"]));
    assert_eq!(extraction.result.all_tables, names(&["y"]));
}

// ============================================================================
// CTE analysis
// ============================================================================

#[test]
fn test_cte_file_analysis() {
    let ctx = TestContext::with_fixture("mixed_project");
    let report = analyze_cte_file(&ctx.path("queries/sample_queries.sql")).unwrap();

    assert_eq!(report.analysis.cte_names, vec!["employee_tree", "team_sizes"]);
    assert_eq!(report.analysis.total_count, 2);
    assert_eq!(report.analysis.unique_count, 2);
    assert!(report.analysis.has_recursive);
    assert!(report.analysis.has_multiple_ctes);
}

#[test]
fn test_cte_file_analysis_python() {
    let ctx = TestContext::with_fixture("mixed_project");
    let report = analyze_cte_file(&ctx.path("scripts/etl_job.py")).unwrap();

    assert_eq!(report.analysis.cte_names, vec!["sales_summary"]);
    assert!(!report.analysis.has_recursive);
    assert!(!report.analysis.has_multiple_ctes);
}
