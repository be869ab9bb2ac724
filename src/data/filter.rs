use crate::error::DataError;

use super::model::{CellValue, Observation, Table};
use super::schema::require_columns;
use super::{GEO_COLUMN, YEAR_COLUMN};

// ---------------------------------------------------------------------------
// Region selection
// ---------------------------------------------------------------------------

/// The rows of one region, ordered by year.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSlice {
    pub region: CellValue,
    /// Numeric columns of the parent table, in file order.
    pub numeric_columns: Vec<String>,
    pub rows: Vec<Observation>,
}

impl RegionSlice {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Options for the region dropdown: distinct non-null `geo` values, sorted.
pub fn region_options(table: &Table) -> Result<Vec<CellValue>, DataError> {
    require_columns(table, &[GEO_COLUMN])?;
    Ok(table
        .unique_values
        .get(GEO_COLUMN)
        .map(|vals| vals.iter().filter(|v| !v.is_null()).cloned().collect())
        .unwrap_or_default())
}

/// Select the rows whose `geo` equals `region`, sorted ascending by `year`.
///
/// Rows without a usable year sort last. The sort is stable, so duplicate
/// (geo, year) rows keep their file order.
pub fn region_slice(table: &Table, region: &CellValue) -> Result<RegionSlice, DataError> {
    require_columns(table, &[GEO_COLUMN, YEAR_COLUMN])?;

    let mut rows: Vec<Observation> = table
        .rows
        .iter()
        .filter(|row| row.get(GEO_COLUMN) == region)
        .cloned()
        .collect();
    rows.sort_by_key(|row| match row.year() {
        Some(y) => (0, y),
        None => (1, 0),
    });

    log::debug!("Region {region}: {} rows", rows.len());

    Ok(RegionSlice {
        region: region.clone(),
        numeric_columns: table.numeric_columns(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn obs(geo: CellValue, year: CellValue, gdp: f64) -> Observation {
        [("geo", geo), ("year", year), ("gdp", CellValue::Float(gdp))]
            .into_iter()
            .collect()
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    fn sample() -> Table {
        Table::new(
            vec!["geo".into(), "year".into(), "gdp".into()],
            vec![
                obs(s("FR10"), CellValue::Integer(2020), 3.0),
                obs(s("DE21"), CellValue::Integer(2019), 9.0),
                obs(s("FR10"), CellValue::Null, 4.0),
                obs(s("FR10"), CellValue::Integer(2018), 1.0),
                obs(CellValue::Null, CellValue::Integer(2018), 0.0),
                obs(s("FR10"), CellValue::Integer(2018), 2.0),
            ],
        )
    }

    #[test]
    fn options_are_sorted_distinct_and_non_null() {
        assert_eq!(region_options(&sample()).unwrap(), vec![s("DE21"), s("FR10")]);
    }

    #[test]
    fn slice_is_ordered_by_year_with_missing_last() {
        let slice = region_slice(&sample(), &s("FR10")).unwrap();
        let years: Vec<Option<i64>> = slice.rows.iter().map(|r| r.year()).collect();
        assert_eq!(years, vec![Some(2018), Some(2018), Some(2020), None]);

        // Duplicates keep file order.
        let gdp: Vec<f64> = slice.rows.iter().filter_map(|r| r.get("gdp").as_f64()).collect();
        assert_eq!(gdp, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn unknown_region_yields_empty_slice() {
        assert!(region_slice(&sample(), &s("IT C4")).unwrap().is_empty());
    }

    #[test]
    fn missing_geo_and_year_are_reported_together() {
        let table = Table::new(vec!["gdp".into()], Vec::new());
        assert_eq!(
            region_slice(&table, &s("FR10")).unwrap_err(),
            DataError::MissingColumns(vec!["geo".into(), "year".into()])
        );
    }
}
