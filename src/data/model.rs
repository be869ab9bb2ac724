use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the merged regional table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Returned for cells a row does not carry.
static NULL_CELL: CellValue = CellValue::Null;

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for charting and statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the value as a calendar year.
    ///
    /// Integers, integral floats and integer-looking strings count; anything
    /// else is treated as a missing year.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// Observation – one (region, year) row of the table
// ---------------------------------------------------------------------------

/// A single row of the source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    /// column_name → value. Absent columns read as `Null`.
    pub values: BTreeMap<String, CellValue>,
}

impl Observation {
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&NULL_CELL)
    }

    /// The row's `year`, if it has a usable one.
    pub fn year(&self) -> Option<i64> {
        self.get(super::YEAR_COLUMN).as_year()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Observation {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Observation {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct Table {
    /// All observations (rows) in file order.
    pub rows: Vec<Observation>,
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values (nulls included).
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
    /// Columns whose non-null cells are all numeric.
    numeric: BTreeSet<String>,
}

impl Table {
    /// Build column indices from the loaded rows.
    pub fn new(column_names: Vec<String>, rows: Vec<Observation>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        let mut numeric: BTreeSet<String> = column_names.iter().cloned().collect();

        for row in &rows {
            for col in &column_names {
                let val = row.get(col);
                if !val.is_null() && !val.is_numeric() {
                    numeric.remove(col);
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }

        Table {
            rows,
            column_names,
            unique_values,
            numeric,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.contains(column)
    }

    /// Numeric column names in file order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|c| self.numeric.contains(*c))
            .cloned()
            .collect()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Observation] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(geo: &str, year: CellValue, gdp: CellValue) -> Observation {
        [
            ("geo", CellValue::String(geo.into())),
            ("year", year),
            ("gdp", gdp),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn numeric_columns_ignore_nulls_but_not_text() {
        let table = Table::new(
            vec!["geo".into(), "year".into(), "gdp".into()],
            vec![
                row("FR10", CellValue::Integer(2019), CellValue::Float(1.5)),
                row("FR10", CellValue::Integer(2020), CellValue::Null),
            ],
        );
        assert_eq!(table.numeric_columns(), vec!["year", "gdp"]);
        assert!(!table.is_numeric("geo"));
    }

    #[test]
    fn year_accepts_integral_values_only() {
        assert_eq!(CellValue::Integer(2018).as_year(), Some(2018));
        assert_eq!(CellValue::Float(2019.0).as_year(), Some(2019));
        assert_eq!(CellValue::Float(2019.5).as_year(), None);
        assert_eq!(CellValue::String(" 2020 ".into()).as_year(), Some(2020));
        assert_eq!(CellValue::Null.as_year(), None);
    }

    #[test]
    fn missing_cells_read_as_null() {
        let obs = row("DE21", CellValue::Integer(2018), CellValue::Null);
        assert!(obs.get("nights_spent").is_null());
        assert_eq!(obs.year(), Some(2018));
    }

    #[test]
    fn head_clamps_to_length() {
        let table = Table::new(
            vec!["geo".into()],
            vec![row("ES51", CellValue::Null, CellValue::Null)],
        );
        assert_eq!(table.head(5).len(), 1);
    }
}
