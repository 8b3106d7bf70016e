//! SQL text scanning: comment/host stripping, CTE scanning, table extraction

mod comments;
mod cte_scanner;
mod host_code;
mod identifier;
mod reconcile;
mod table_extractor;

pub use comments::strip_comments;
pub use cte_scanner::{
    analyze_ctes, extract_cte_names, extract_cte_names_unique, has_recursive_cte,
    scan_cte_names, CteAnalysis, CteScanner,
};
pub use host_code::strip_host_code;
pub use identifier::{
    clean_table_name, is_sql_keyword, is_valid_identifier, validate_table_name, validation_key,
};
pub use reconcile::{extract_tables, reconcile, ExtractionResult};
pub use table_extractor::{
    extract_table_references, find_table_references, StatementKind, TableReference,
};
