use crate::error::DataError;

use super::model::Table;

/// Check that every column in `required` exists in `table`.
///
/// All absent columns are reported at once, in the order they were requested.
pub fn require_columns(table: &Table, required: &[&str]) -> Result<(), DataError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

/// First of `candidates` present in `table`.
///
/// Used for metrics that were published under more than one column name.
pub fn resolve_column<'a>(table: &Table, candidates: &[&'a str]) -> Result<&'a str, DataError> {
    candidates
        .iter()
        .copied()
        .find(|c| table.has_column(c))
        .ok_or_else(|| DataError::MissingColumns(vec![candidates.join(" or ")]))
}
