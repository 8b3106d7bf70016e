//! Integration tests for directory scans

use pretty_assertions::assert_eq;

use rust_sqltables::{
    extract_files, merge_extractions, report, scan, scan_ctes, ScanOptions, StatementKind,
};

use crate::common::{names, TestContext};

fn options_for(ctx: &TestContext) -> ScanOptions {
    ScanOptions {
        inputs: vec![ctx.root.clone()],
        ..Default::default()
    }
}

#[test]
fn test_scan_directory_finds_supported_files() {
    let ctx = TestContext::with_fixture("mixed_project");
    let extractions = scan(&options_for(&ctx)).unwrap();

    let files: Vec<String> = extractions
        .iter()
        .map(|e| e.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec!["sample_queries.sql", "etl_job.py", "refresh.sh"]);
}

#[test]
fn test_scan_merged_result() {
    let ctx = TestContext::with_fixture("mixed_project");
    let merged = merge_extractions(&scan(&options_for(&ctx)).unwrap());

    assert_eq!(
        merged.all_tables,
        names(&[
            "action_logs",
            "customers",
            "daily_revenue",
            "employees",
            "inventory",
            "order_items",
            "orders",
            "products",
            "refunds",
            "snapshot_orders",
            "staging_orders",
            "temp_cache",
            "users",
        ])
    );
    assert_eq!(
        merged.cte_tables,
        names(&["employee_tree", "sales_summary", "team_sizes"])
    );
    assert!(merged.all_tables.is_disjoint(&merged.cte_tables));
    assert_eq!(
        merged.tables_for(StatementKind::Truncate),
        Some(&names(&["snapshot_orders", "staging_orders"]))
    );
}

#[test]
fn test_scan_with_exclude() {
    let ctx = TestContext::with_fixture("mixed_project");
    let options = ScanOptions {
        exclude: vec!["*/scripts/*".to_string()],
        ..options_for(&ctx)
    };
    let extractions = scan(&options).unwrap();
    assert_eq!(extractions.len(), 1);
    assert!(extractions[0].path.ends_with("queries/sample_queries.sql"));
}

#[test]
fn test_scan_missing_explicit_file_fails() {
    let ctx = TestContext::empty();
    let options = ScanOptions {
        inputs: vec![ctx.path("absent.sql")],
        ..Default::default()
    };
    let err = scan(&options).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_parallel_extraction_preserves_order() {
    let ctx = TestContext::empty();
    let files: Vec<_> = (0..20)
        .map(|i| {
            ctx.write(
                &format!("q{:02}.sql", i),
                &format!("SELECT * FROM table_{:02}", i),
            )
        })
        .collect();

    let extractions = extract_files(&files).unwrap();
    assert_eq!(extractions.len(), 20);
    for (i, extraction) in extractions.iter().enumerate() {
        assert_eq!(extraction.path, files[i]);
        assert_eq!(
            extraction.result.all_tables,
            names(&[format!("table_{:02}", i).as_str()])
        );
    }
}

#[test]
fn test_scan_ctes() {
    let ctx = TestContext::with_fixture("mixed_project");
    let reports = scan_ctes(&options_for(&ctx)).unwrap();
    let total: usize = reports.iter().map(|r| r.analysis.total_count).sum();
    assert_eq!(total, 3);
}

#[test]
fn test_file_report_is_deterministic() {
    let ctx = TestContext::with_fixture("mixed_project");
    let first = scan(&options_for(&ctx)).unwrap();
    let second = scan(&options_for(&ctx)).unwrap();

    let render = |extractions: &[rust_sqltables::FileExtraction]| {
        extractions
            .iter()
            .map(report::format_file_extraction)
            .collect::<Vec<_>>()
    };
    assert_eq!(render(&first), render(&second));
    assert!(render(&first)[2].contains("TRUNCATE TABLE (1):\n  - snapshot_orders"));
}
