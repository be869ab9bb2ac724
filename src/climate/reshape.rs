use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::labels::ClimateLabels;
use crate::data::filter::RegionSlice;

// ---------------------------------------------------------------------------
// Which columns hold climate-zone fractions
// ---------------------------------------------------------------------------

/// Naming rule that marks a numeric column as a climate-zone fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "convention", rename_all = "snake_case")]
pub enum ClimateConvention {
    /// Case-sensitive prefix, e.g. `pct_Cfb`. The prefix is stripped to form
    /// the climate code.
    Prefix {
        #[serde(default = "default_prefix")]
        prefix: String,
    },
    /// Case-insensitive substring match. The whole column name is the code.
    Keywords {
        #[serde(default = "default_keywords")]
        keywords: Vec<String>,
    },
}

fn default_prefix() -> String {
    "pct_".to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["temp".to_string(), "climate".to_string()]
}

impl Default for ClimateConvention {
    fn default() -> Self {
        ClimateConvention::Prefix {
            prefix: default_prefix(),
        }
    }
}

impl ClimateConvention {
    /// The climate code carried by `column`, or `None` if it does not qualify.
    /// An empty prefix matches nothing.
    pub fn code_for<'a>(&self, column: &'a str) -> Option<&'a str> {
        match self {
            ClimateConvention::Prefix { prefix } if prefix.is_empty() => None,
            ClimateConvention::Prefix { prefix } => column
                .strip_prefix(prefix.as_str())
                .filter(|code| !code.is_empty()),
            ClimateConvention::Keywords { keywords } => {
                let lower = column.to_lowercase();
                keywords
                    .iter()
                    .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
                    .then_some(column)
            }
        }
    }
}

/// A qualifying column and the code it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateColumn {
    pub column: String,
    pub code: String,
}

/// Scan the slice's numeric columns for climate fractions, in column order.
pub fn climate_columns(slice: &RegionSlice, convention: &ClimateConvention) -> Vec<ClimateColumn> {
    slice
        .numeric_columns
        .iter()
        .filter_map(|col| {
            convention.code_for(col).map(|code| ClimateColumn {
                column: col.clone(),
                code: code.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Wide → long
// ---------------------------------------------------------------------------

/// One (year, climate zone) observation of the tidy table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateRecord {
    pub year: Option<i64>,
    pub code: String,
    /// Share of the region under `code`. Not normalised; NaN for a null cell.
    pub fraction: f64,
    pub label: String,
}

/// Unpivot `columns` of `slice` into one record per (column, row) cell.
///
/// Output is column-major: every row of the first column, then the next.
pub fn reshape(
    slice: &RegionSlice,
    columns: &[ClimateColumn],
    labels: &ClimateLabels,
) -> Vec<ClimateRecord> {
    let mut records = Vec::with_capacity(columns.len() * slice.len());
    for col in columns {
        let label = labels.label(&col.code);
        for row in &slice.rows {
            records.push(ClimateRecord {
                year: row.year(),
                code: col.code.clone(),
                fraction: row.get(&col.column).as_f64().unwrap_or(f64::NAN),
                label: label.to_string(),
            });
        }
    }
    records
}

/// Detect climate columns under `convention` and reshape them.
pub fn climate_composition(
    slice: &RegionSlice,
    convention: &ClimateConvention,
    labels: &ClimateLabels,
) -> Vec<ClimateRecord> {
    let columns = climate_columns(slice, convention);
    let records = reshape(slice, &columns, labels);
    log::debug!(
        "Region {}: {} climate columns → {} records",
        slice.region,
        columns.len(),
        records.len()
    );
    records
}

// ---------------------------------------------------------------------------
// Stacking for the area chart
// ---------------------------------------------------------------------------

/// One year of a stacked band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub year: i64,
    pub lower: f64,
    pub upper: f64,
}

/// The area occupied by one climate code in the stacked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBand {
    pub code: String,
    pub label: String,
    pub points: Vec<BandPoint>,
}

/// Stack the records' fractions per year, codes in order of first appearance.
///
/// Duplicate (code, year) fractions are summed; a year a code lacks counts
/// as 0, as do NaN fractions. Records without a year are dropped.
pub fn stack_bands(records: &[ClimateRecord]) -> Vec<StackedBand> {
    let years: BTreeSet<i64> = records.iter().filter_map(|r| r.year).collect();

    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut per_code: BTreeMap<&str, BTreeMap<i64, f64>> = BTreeMap::new();
    for rec in records {
        if !per_code.contains_key(rec.code.as_str()) {
            order.push((rec.code.as_str(), rec.label.as_str()));
        }
        let by_year = per_code.entry(rec.code.as_str()).or_default();
        if let Some(year) = rec.year {
            let v = if rec.fraction.is_nan() { 0.0 } else { rec.fraction };
            *by_year.entry(year).or_default() += v;
        }
    }

    let mut base: BTreeMap<i64, f64> = years.iter().map(|y| (*y, 0.0)).collect();
    order
        .into_iter()
        .map(|(code, label)| {
            let by_year = &per_code[code];
            let points = base
                .iter_mut()
                .map(|(year, lower)| {
                    let v = by_year.get(year).copied().unwrap_or(0.0);
                    let point = BandPoint {
                        year: *year,
                        lower: *lower,
                        upper: *lower + v,
                    };
                    *lower += v;
                    point
                })
                .collect();
            StackedBand {
                code: code.to_string(),
                label: label.to_string(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::region_slice;
    use crate::data::model::{CellValue, Observation, Table};
    use pretty_assertions::assert_eq;

    fn slice(rows: &[(i64, f64, f64)]) -> RegionSlice {
        RegionSlice {
            region: CellValue::String("FR10".into()),
            numeric_columns: vec![
                "year".into(),
                "gdp".into(),
                "pct_Cfb".into(),
                "pct_BSh".into(),
            ],
            rows: rows
                .iter()
                .map(|&(year, cfb, bsh)| -> Observation {
                    [
                        ("geo", CellValue::String("FR10".into())),
                        ("year", CellValue::Integer(year)),
                        ("gdp", CellValue::Float(100.0)),
                        ("pct_Cfb", CellValue::Float(cfb)),
                        ("pct_BSh", CellValue::Float(bsh)),
                    ]
                    .into_iter()
                    .collect()
                })
                .collect(),
        }
    }

    fn scenario() -> RegionSlice {
        slice(&[(2018, 0.5, 0.5), (2019, 0.4, 0.6), (2020, 0.3, 0.7)])
    }

    #[test]
    fn prefix_convention_strips_prefix() {
        let conv = ClimateConvention::default();
        assert_eq!(conv.code_for("pct_Cfb"), Some("Cfb"));
        assert_eq!(conv.code_for("PCT_Cfb"), None);
        assert_eq!(conv.code_for("pct_"), None);
        assert_eq!(conv.code_for("gdp"), None);
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        let conv = ClimateConvention::Prefix { prefix: String::new() };
        assert_eq!(conv.code_for("year"), None);
        assert_eq!(conv.code_for("pct_Cfb"), None);
        assert!(climate_composition(&scenario(), &conv, &ClimateLabels::koppen()).is_empty());
    }

    #[test]
    fn text_columns_never_qualify() {
        let rows = [(2018, "0.5"), (2019, "n/a")]
            .into_iter()
            .map(|(year, bsh)| -> Observation {
                [
                    ("geo", CellValue::String("ES61".into())),
                    ("year", CellValue::Integer(year)),
                    ("pct_Cfb", CellValue::Float(0.5)),
                    ("pct_BSh", match bsh.parse::<f64>() {
                        Ok(v) => CellValue::Float(v),
                        Err(_) => CellValue::String(bsh.into()),
                    }),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        let table = Table::new(
            vec!["geo".into(), "year".into(), "pct_Cfb".into(), "pct_BSh".into()],
            rows,
        );
        let s = region_slice(&table, &CellValue::String("ES61".into())).unwrap();
        let records = climate_composition(&s, &ClimateConvention::default(), &ClimateLabels::koppen());

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.code == "Cfb"));
    }

    #[test]
    fn keyword_convention_is_case_insensitive_and_keeps_name() {
        let conv = ClimateConvention::Keywords {
            keywords: vec!["temp".into(), "climate".into()],
        };
        assert_eq!(conv.code_for("Mean_TEMP"), Some("Mean_TEMP"));
        assert_eq!(conv.code_for("climate_Cfb"), Some("climate_Cfb"));
        assert_eq!(conv.code_for("gdp"), None);
    }

    #[test]
    fn scenario_reshapes_to_six_labelled_records() {
        let labels = ClimateLabels::koppen();
        let records = climate_composition(&scenario(), &ClimateConvention::default(), &labels);

        assert_eq!(records.len(), 6);
        let summary: Vec<(Option<i64>, &str, f64, &str)> = records
            .iter()
            .map(|r| (r.year, r.code.as_str(), r.fraction, r.label.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(2018), "Cfb", 0.5, "Oceanic"),
                (Some(2019), "Cfb", 0.4, "Oceanic"),
                (Some(2020), "Cfb", 0.3, "Oceanic"),
                (Some(2018), "BSh", 0.5, "Hot semi-arid"),
                (Some(2019), "BSh", 0.6, "Hot semi-arid"),
                (Some(2020), "BSh", 0.7, "Hot semi-arid"),
            ]
        );
    }

    #[test]
    fn record_count_is_rows_times_columns() {
        let s = slice(&[(2018, 0.1, 0.2), (2018, 0.3, 0.4), (2021, -1.0, 5.0), (2022, 0.0, 0.0)]);
        let cols = climate_columns(&s, &ClimateConvention::default());
        let records = reshape(&s, &cols, &ClimateLabels::koppen());
        assert_eq!(records.len(), s.len() * cols.len());
        // No validation of out-of-range fractions.
        assert!(records.iter().any(|r| r.fraction == -1.0));
    }

    #[test]
    fn no_matching_columns_reshape_to_nothing() {
        let conv = ClimateConvention::Prefix {
            prefix: "koppen_".into(),
        };
        assert!(climate_composition(&scenario(), &conv, &ClimateLabels::koppen()).is_empty());
    }

    #[test]
    fn unknown_codes_keep_raw_label() {
        let mut s = scenario();
        s.numeric_columns.push("pct_Xyz".into());
        for row in &mut s.rows {
            row.values.insert("pct_Xyz".into(), CellValue::Null);
        }
        let records = climate_composition(&s, &ClimateConvention::default(), &ClimateLabels::koppen());
        let xyz: Vec<&ClimateRecord> = records.iter().filter(|r| r.code == "Xyz").collect();
        assert_eq!(xyz.len(), 3);
        assert!(xyz.iter().all(|r| r.label == "Xyz" && r.fraction.is_nan()));
    }

    #[test]
    fn reshape_is_repeatable() {
        let labels = ClimateLabels::koppen();
        let conv = ClimateConvention::default();
        let s = scenario();
        assert_eq!(
            climate_composition(&s, &conv, &labels),
            climate_composition(&s, &conv, &labels)
        );
    }

    #[test]
    fn bands_stack_in_column_order() {
        let labels = ClimateLabels::koppen();
        let records = climate_composition(&scenario(), &ClimateConvention::default(), &labels);
        let bands = stack_bands(&records);

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].code, "Cfb");
        assert_eq!(bands[1].label, "Hot semi-arid");
        let top: Vec<(i64, f64, f64)> = bands[1]
            .points
            .iter()
            .map(|p| (p.year, p.lower, p.upper))
            .collect();
        assert_eq!(top, vec![(2018, 0.5, 1.0), (2019, 0.4, 1.0), (2020, 0.3, 1.0)]);
    }

    #[test]
    fn duplicate_years_are_summed_and_gaps_are_zero() {
        let rec = |year: Option<i64>, code: &str, fraction: f64| ClimateRecord {
            year,
            code: code.into(),
            fraction,
            label: code.into(),
        };
        let records = vec![
            rec(Some(2018), "Cfb", 0.25),
            rec(Some(2018), "Cfb", 0.25),
            rec(None, "Cfb", 9.0),
            rec(Some(2019), "Csa", f64::NAN),
            rec(Some(2020), "Csa", 0.5),
        ];
        let bands = stack_bands(&records);

        assert_eq!(
            bands[0].points,
            vec![
                BandPoint { year: 2018, lower: 0.0, upper: 0.5 },
                BandPoint { year: 2019, lower: 0.0, upper: 0.0 },
                BandPoint { year: 2020, lower: 0.0, upper: 0.0 },
            ]
        );
        assert_eq!(
            bands[1].points,
            vec![
                BandPoint { year: 2018, lower: 0.5, upper: 0.5 },
                BandPoint { year: 2019, lower: 0.0, upper: 0.0 },
                BandPoint { year: 2020, lower: 0.0, upper: 0.5 },
            ]
        );
    }
}
