//! Flat-file loading of the reference tables.
//!
//! Each table has a strict per-file loader returning a typed row set, plus
//! the lenient [`KnowledgeBase::load_dir`] entry point used by the request
//! boundary: any file that cannot be read yields an empty table and a
//! warning rather than an error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::csv::{parse_records, split_list};
use crate::tables::{Condition, Diagnostic, DiagnosticGroup, DiagnosticMetric};
use crate::{
    KnowledgeError, KnowledgeResult, CONDITIONS_FILENAME, DIAGNOSTICS_FILENAME, GROUPS_FILENAME,
    METRICS_FILENAME,
};

/// The four reference tables, fully materialized.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    pub metrics: Vec<DiagnosticMetric>,
    pub conditions: Vec<Condition>,
    pub groups: Vec<DiagnosticGroup>,
    pub diagnostics: Vec<Diagnostic>,
}

impl KnowledgeBase {
    /// Load all four tables from a knowledge directory, leniently.
    ///
    /// Each table comes from its well-known filename inside `dir`. A file
    /// that cannot be read degrades to an empty table with a warning; the
    /// analysis then simply finds no related entities for that table.
    pub fn load_dir(dir: &Path) -> Self {
        KnowledgeBase {
            metrics: load_or_empty(dir, METRICS_FILENAME, load_metrics),
            conditions: load_or_empty(dir, CONDITIONS_FILENAME, load_conditions),
            groups: load_or_empty(dir, GROUPS_FILENAME, load_groups),
            diagnostics: load_or_empty(dir, DIAGNOSTICS_FILENAME, load_diagnostics),
        }
    }

    /// Whether every table is empty.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
            && self.conditions.is_empty()
            && self.groups.is_empty()
            && self.diagnostics.is_empty()
    }
}

fn load_or_empty<T>(
    dir: &Path,
    filename: &str,
    load: fn(&Path) -> KnowledgeResult<Vec<T>>,
) -> Vec<T> {
    let path = dir.join(filename);
    match load(&path) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("failed to load {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Load the diagnostic metrics table.
///
/// # Errors
///
/// Returns [`KnowledgeError::FileRead`] when the file cannot be read.
pub fn load_metrics(path: &Path) -> KnowledgeResult<Vec<DiagnosticMetric>> {
    let content = fs::read_to_string(path).map_err(KnowledgeError::FileRead)?;
    Ok(parse_records(&content)
        .iter()
        .map(|record| DiagnosticMetric {
            name: field(record, "name"),
            oru_sonic_codes: list(record, "oru_sonic_codes"),
            diagnostic_groups: list(record, "diagnostic_groups"),
            units: field(record, "units"),
            age_ranges: list(record, "age_ranges"),
            gender: field(record, "gender"),
            reference_ranges: list(record, "reference_ranges"),
        })
        .collect())
}

/// Load the conditions table.
///
/// # Errors
///
/// Returns [`KnowledgeError::FileRead`] when the file cannot be read.
pub fn load_conditions(path: &Path) -> KnowledgeResult<Vec<Condition>> {
    let content = fs::read_to_string(path).map_err(KnowledgeError::FileRead)?;
    Ok(parse_records(&content)
        .iter()
        .map(|record| Condition {
            name: field(record, "name"),
            diagnostic_metrics: list(record, "diagnostic_metrics"),
            diagnostic_groups: list(record, "diagnostic_groups"),
            diagnostics: list(record, "diagnostics"),
        })
        .collect())
}

/// Load the diagnostic groups table.
///
/// # Errors
///
/// Returns [`KnowledgeError::FileRead`] when the file cannot be read.
pub fn load_groups(path: &Path) -> KnowledgeResult<Vec<DiagnosticGroup>> {
    let content = fs::read_to_string(path).map_err(KnowledgeError::FileRead)?;
    Ok(parse_records(&content)
        .iter()
        .map(|record| DiagnosticGroup {
            name: field(record, "name"),
            diagnostic_metrics: list(record, "diagnostic_metrics"),
            diagnostics: list(record, "diagnostics"),
        })
        .collect())
}

/// Load the diagnostics table.
///
/// # Errors
///
/// Returns [`KnowledgeError::FileRead`] when the file cannot be read.
pub fn load_diagnostics(path: &Path) -> KnowledgeResult<Vec<Diagnostic>> {
    let content = fs::read_to_string(path).map_err(KnowledgeError::FileRead)?;
    Ok(parse_records(&content)
        .iter()
        .map(|record| Diagnostic {
            name: field(record, "name"),
            diagnostic_metrics: list(record, "diagnostic_metrics"),
        })
        .collect())
}

fn field(record: &HashMap<String, String>, column: &str) -> String {
    record.get(column).cloned().unwrap_or_default()
}

fn list(record: &HashMap<String, String>, column: &str) -> Vec<String> {
    record
        .get(column)
        .map(|value| split_list(value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).expect("create file");
        file.write_all(content.as_bytes()).expect("write file");
    }

    #[test]
    fn loads_metrics_with_list_cells() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            METRICS_FILENAME,
            "name,oru_sonic_codes,diagnostic_groups,units,age_ranges,gender,reference_ranges\n\
             Glucose,\"GLU,BGL\",\"Metabolic\",mmol/L,\"18-99\",Any,\"3.5-5.5\"\n",
        );

        let metrics = load_metrics(&dir.path().join(METRICS_FILENAME)).expect("load metrics");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "Glucose");
        assert_eq!(metrics[0].oru_sonic_codes, vec!["GLU", "BGL"]);
        assert_eq!(metrics[0].units, "mmol/L");
        assert_eq!(metrics[0].reference_ranges, vec!["3.5-5.5"]);
    }

    #[test]
    fn missing_columns_decode_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), CONDITIONS_FILENAME, "name\nDiabetes\n");

        let conditions =
            load_conditions(&dir.path().join(CONDITIONS_FILENAME)).expect("load conditions");
        assert_eq!(conditions[0].name, "Diabetes");
        assert!(conditions[0].diagnostic_metrics.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_error_for_strict_loaders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_metrics(&dir.path().join(METRICS_FILENAME)).expect_err("missing file");
        assert!(matches!(err, KnowledgeError::FileRead(_)));
    }

    #[test]
    fn load_dir_degrades_missing_files_to_empty_tables() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            DIAGNOSTICS_FILENAME,
            "name,diagnostic_metrics\nHbA1c Panel,\"HbA1c\"\n",
        );

        let kb = KnowledgeBase::load_dir(dir.path());
        assert!(kb.metrics.is_empty());
        assert!(kb.conditions.is_empty());
        assert!(kb.groups.is_empty());
        assert_eq!(kb.diagnostics.len(), 1);
        assert!(!kb.is_empty());
    }
}
