use crate::error::DataError;

use super::filter::RegionSlice;
use super::model::Table;
use super::schema::resolve_column;

/// A metric drawn as a line chart on the exploration page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub title: &'static str,
    /// Accepted column names, in order of preference.
    pub columns: &'static [&'static str],
}

pub const METRICS: &[Metric] = &[
    Metric {
        title: "Tourism – nights spent",
        columns: &["nights_spent"],
    },
    Metric {
        title: "GDP",
        columns: &["gdp"],
    },
    Metric {
        title: "Population",
        columns: &["pop"],
    },
    Metric {
        title: "Employment",
        columns: &["employment", "employment_rate"],
    },
    Metric {
        title: "Unemployment",
        columns: &["unemployment"],
    },
];

/// A metric's points for one region, `[year, value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub column: String,
    pub points: Vec<[f64; 2]>,
}

/// Build the time series of `metric` for the slice.
///
/// The metric column must exist in the table and be numeric. Rows without a
/// year or a value are skipped.
pub fn metric_series(
    table: &Table,
    slice: &RegionSlice,
    metric: &Metric,
) -> Result<MetricSeries, DataError> {
    let column = resolve_column(table, metric.columns)?;
    if !table.is_numeric(column) {
        return Err(DataError::NotNumeric(column.to_string()));
    }

    let points = slice
        .rows
        .iter()
        .filter_map(|row| {
            let year = row.year()?;
            let value = row.get(column).as_f64()?;
            Some([year as f64, value])
        })
        .collect();

    Ok(MetricSeries {
        column: column.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::region_slice;
    use crate::data::model::{CellValue, Observation};

    fn table() -> Table {
        let rows = [(2019, Some(0.61)), (2018, Some(0.60)), (2020, None)]
            .into_iter()
            .map(|(year, rate)| -> Observation {
                [
                    ("geo", CellValue::String("ES51".into())),
                    ("year", CellValue::Integer(year)),
                    ("employment_rate", rate.map_or(CellValue::Null, CellValue::Float)),
                    ("gdp", CellValue::String("n/a".into())),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        Table::new(
            vec!["geo".into(), "year".into(), "employment_rate".into(), "gdp".into()],
            rows,
        )
    }

    #[test]
    fn employment_falls_back_to_rate_and_skips_nulls() {
        let t = table();
        let slice = region_slice(&t, &CellValue::String("ES51".into())).unwrap();
        let series = metric_series(&t, &slice, &METRICS[3]).unwrap();
        assert_eq!(series.column, "employment_rate");
        assert_eq!(series.points, vec![[2018.0, 0.60], [2019.0, 0.61]]);
    }

    #[test]
    fn missing_and_textual_metrics_are_errors() {
        let t = table();
        let slice = region_slice(&t, &CellValue::String("ES51".into())).unwrap();
        assert_eq!(
            metric_series(&t, &slice, &METRICS[0]),
            Err(DataError::MissingColumns(vec!["nights_spent".into()]))
        );
        assert_eq!(
            metric_series(&t, &slice, &METRICS[1]),
            Err(DataError::NotNumeric("gdp".into()))
        );
    }
}
