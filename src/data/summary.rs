use std::collections::BTreeMap;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Descriptive statistics over every column
// ---------------------------------------------------------------------------

/// Row labels of the summary table, in display order.
pub const SUMMARY_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Statistics for one column. Fields that do not apply to the column's kind
/// are `None` and render blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    // Non-numeric columns.
    pub unique: Option<usize>,
    pub top: Option<CellValue>,
    pub freq: Option<usize>,
    // Numeric columns.
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Display text for one of [`SUMMARY_ROWS`].
    pub fn cell(&self, stat: &str) -> String {
        let num = |v: Option<f64>| v.map(|v| format!("{v:.4}")).unwrap_or_default();
        match stat {
            "count" => self.count.to_string(),
            "unique" => self.unique.map(|u| u.to_string()).unwrap_or_default(),
            "top" => self.top.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            "freq" => self.freq.map(|f| f.to_string()).unwrap_or_default(),
            "mean" => num(self.mean),
            "std" => num(self.std),
            "min" => num(self.min),
            "25%" => num(self.q25),
            "50%" => num(self.q50),
            "75%" => num(self.q75),
            "max" => num(self.max),
            _ => String::new(),
        }
    }
}

/// Summarise every column of `table`, in file order.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .column_names
        .iter()
        .map(|col| {
            let values: Vec<&CellValue> = table
                .rows
                .iter()
                .map(|r| r.get(col))
                .filter(|v| !v.is_null())
                .collect();
            if table.is_numeric(col) {
                numeric_summary(col, &values)
            } else {
                categorical_summary(col, &values)
            }
        })
        .collect()
}

fn numeric_summary(column: &str, values: &[&CellValue]) -> ColumnSummary {
    let mut sorted: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mut summary = ColumnSummary {
        column: column.to_string(),
        count: n,
        ..Default::default()
    };
    if n == 0 {
        return summary;
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    summary.mean = Some(mean);
    summary.std = (n > 1).then(|| {
        let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    });
    summary.min = sorted.first().copied();
    summary.q25 = Some(quantile(&sorted, 0.25));
    summary.q50 = Some(quantile(&sorted, 0.50));
    summary.q75 = Some(quantile(&sorted, 0.75));
    summary.max = sorted.last().copied();
    summary
}

fn categorical_summary(column: &str, values: &[&CellValue]) -> ColumnSummary {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(*v).or_default() += 1;
    }

    // Ties resolve to the smallest value: only a strictly larger count wins.
    let mut top: Option<(&CellValue, usize)> = None;
    for (val, n) in &counts {
        if top.map_or(true, |(_, best)| *n > best) {
            top = Some((*val, *n));
        }
    }

    ColumnSummary {
        column: column.to_string(),
        count: values.len(),
        unique: Some(counts.len()),
        top: top.map(|(v, _)| v.clone()),
        freq: top.map(|(_, n)| n),
        ..Default::default()
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
