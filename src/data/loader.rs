use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CellValue, Observation, Table};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Extensions accepted by [`load_file`], for the file dialog filter.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "parquet", "pq"];

/// Load a merged regional table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – flat Parquet file, one column per variable
/// * `.csv`             – comma-separated with a header row
/// * `.tsv`             – tab-separated with a header row
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "csv" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; every cell is typed on its own
/// (integer → float → bool → text, empty → null). Short rows are padded
/// with nulls, extra trailing fields are ignored.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .context("opening delimited file")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        let row: Observation = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(f)
        };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Pandas index columns are ordinary
/// columns here.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let obs: Observation = column_names
                .iter()
                .zip(batch.columns())
                .map(|(col, array)| (col.clone(), extract_cell(array, row)))
                .collect();
            rows.push(obs);
        }
    }

    Ok(Table::new(column_names, rows))
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float32 => float_cell(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        // Dates, decimals, dictionaries, …: keep their display text.
        _ => match array_value_to_string(col, row) {
            Ok(s) => CellValue::String(s),
            Err(e) => {
                log::warn!("Unreadable {:?} cell at row {row}: {e}", col.data_type());
                CellValue::Null
            }
        },
    }
}

/// Pandas writes missing floats as NaN rather than null.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_cells_are_typed_individually() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "merged.csv",
            "geo,year,gdp,pct_Cfb\nFR10,2019,712.5,0.4\nFR10,2020,,NaN\n",
        );
        let table = load_file(&path).unwrap();

        assert_eq!(table.column_names, vec!["geo", "year", "gdp", "pct_Cfb"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("geo"), &CellValue::String("FR10".into()));
        assert_eq!(table.rows[0].get("year"), &CellValue::Integer(2019));
        assert_eq!(table.rows[0].get("gdp"), &CellValue::Float(712.5));
        assert!(table.rows[1].get("gdp").is_null());
        assert!(table.rows[1].get("pct_Cfb").is_null());
        assert_eq!(table.numeric_columns(), vec!["year", "gdp", "pct_Cfb"]);
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ragged.csv", "geo,year,gdp\nFR10,2019,1.5\nFR10,2020\n");
        let table = load_file(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("year"), &CellValue::Integer(2020));
        assert!(table.rows[1].get("gdp").is_null());
        assert!(table.is_numeric("gdp"));
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "merged.TSV", "geo\tyear\nDE21\t2018\n");
        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("geo"), &CellValue::String("DE21".into()));
        assert_eq!(table.rows[0].get("year"), &CellValue::Integer(2018));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "merged.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnsupportedFormat("xlsx".into()))
        );
    }

    #[test]
    fn parquet_columns_keep_arrow_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("geo", DataType::Utf8, false),
            Field::new("year", DataType::Int64, false),
            Field::new("pct_BSh", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["ES61", "ES61"])),
                Arc::new(Int64Array::from(vec![2018, 2019])),
                Arc::new(Float64Array::from(vec![Some(0.5), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names, vec!["geo", "year", "pct_BSh"]);
        assert_eq!(table.rows[1].get("year"), &CellValue::Integer(2019));
        assert_eq!(table.rows[0].get("pct_BSh"), &CellValue::Float(0.5));
        assert!(table.rows[1].get("pct_BSh").is_null());
        assert!(table.is_numeric("pct_BSh"));
    }
}
