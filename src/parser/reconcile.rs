//! Reconciliation of table references against CTE names
//!
//! CTE names are subtracted from every statement kind by exact,
//! case-sensitive string match. Kinds left empty are dropped.

use std::collections::{BTreeMap, BTreeSet};

use super::comments::strip_comments;
use super::cte_scanner::scan_cte_names;
use super::host_code::strip_host_code;
use super::table_extractor::{extract_table_references, StatementKind};

/// Tables referenced by a piece of SQL, with CTE names removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Real tables per statement kind (only non-empty kinds are present)
    pub tables: BTreeMap<StatementKind, BTreeSet<String>>,
    /// Union of all per-kind sets
    pub all_tables: BTreeSet<String>,
    /// CTE names that were excluded, kept for reference
    pub cte_tables: BTreeSet<String>,
}

impl ExtractionResult {
    /// Tables found for one statement kind, if any.
    pub fn tables_for(&self, kind: StatementKind) -> Option<&BTreeSet<String>> {
        self.tables.get(&kind)
    }

    /// True when neither real tables nor CTE names were found.
    pub fn is_empty(&self) -> bool {
        self.all_tables.is_empty() && self.cte_tables.is_empty()
    }

    /// Fold another result into this one.
    ///
    /// A CTE name from either side is removed from the merged real tables,
    /// so `all_tables` and `cte_tables` stay disjoint.
    pub fn merge(&mut self, other: &ExtractionResult) {
        self.cte_tables.extend(other.cte_tables.iter().cloned());

        for (kind, names) in &other.tables {
            self.tables
                .entry(*kind)
                .or_default()
                .extend(names.iter().cloned());
        }

        let cte_tables = &self.cte_tables;
        for names in self.tables.values_mut() {
            names.retain(|name| !cte_tables.contains(name));
        }
        self.tables.retain(|_, names| !names.is_empty());

        self.all_tables = self.tables.values().flatten().cloned().collect();
    }
}

/// Subtract CTE names from each kind's tables and build the final result.
pub fn reconcile(
    references: BTreeMap<StatementKind, BTreeSet<String>>,
    cte_names: BTreeSet<String>,
) -> ExtractionResult {
    let mut tables = BTreeMap::new();
    let mut all_tables = BTreeSet::new();

    for (kind, names) in references {
        let real: BTreeSet<String> = names
            .into_iter()
            .filter(|name| !cte_names.contains(name))
            .collect();
        if real.is_empty() {
            continue;
        }
        all_tables.extend(real.iter().cloned());
        tables.insert(kind, real);
    }

    ExtractionResult {
        tables,
        all_tables,
        cte_tables: cte_names,
    }
}

/// Run the full extraction over one unit of source text.
///
/// With `strip_host` set, host-language lines (imports, shebangs, `#`
/// comments) are removed before SQL comments.
pub fn extract_tables(source: &str, strip_host: bool) -> ExtractionResult {
    let sql = if strip_host {
        strip_comments(&strip_host_code(source))
    } else {
        strip_comments(source)
    };

    let cte_names: BTreeSet<String> = scan_cte_names(&sql).into_iter().collect();
    let references = extract_table_references(&sql);
    reconcile(references, cte_names)
}
