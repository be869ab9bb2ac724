use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Climate codes present in the sample, one `pct_<code>` column each.
const CODES: [&str; 5] = ["Cfb", "Csa", "Csb", "BSk", "Dfb"];

struct Region {
    geo: &'static str,
    nights: f64,
    gdp: f64,
    pop: f64,
    employment: f64,
    /// Starting share per entry of `CODES`.
    climate: [f64; 5],
}

#[rustfmt::skip]
const REGIONS: &[Region] = &[
    Region { geo: "AT33", nights: 49.0e6, gdp: 36.0e3, pop: 0.76e6, employment: 0.75, climate: [0.20, 0.00, 0.00, 0.00, 0.80] },
    Region { geo: "DE21", nights: 35.0e6, gdp: 290.0e3, pop: 4.70e6, employment: 0.80, climate: [0.85, 0.00, 0.00, 0.00, 0.15] },
    Region { geo: "ES51", nights: 52.0e6, gdp: 230.0e3, pop: 7.70e6, employment: 0.68, climate: [0.00, 0.70, 0.10, 0.20, 0.00] },
    Region { geo: "FR10", nights: 70.0e6, gdp: 760.0e3, pop: 12.30e6, employment: 0.71, climate: [1.00, 0.00, 0.00, 0.00, 0.00] },
    Region { geo: "ITC4", nights: 40.0e6, gdp: 400.0e3, pop: 10.00e6, employment: 0.67, climate: [0.55, 0.30, 0.00, 0.00, 0.15] },
];

const YEARS: std::ops::RangeInclusive<i64> = 2015..=2022;

#[derive(Default)]
struct Columns {
    geo: Vec<String>,
    year: Vec<i64>,
    nights_spent: Vec<f64>,
    gdp: Vec<f64>,
    pop: Vec<f64>,
    employment_rate: Vec<f64>,
    unemployment: Vec<f64>,
    climate: [Vec<f64>; 5],
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();
    for region in REGIONS {
        // Drift shares from the first code towards the second-to-last,
        // renormalised so each year sums to 1.
        let mut shares = region.climate;
        for year in YEARS {
            let t = (year - YEARS.start()) as f64;
            // 2020: tourism collapse.
            let shock = if year == 2020 { 0.45 } else { 1.0 };

            cols.geo.push(region.geo.to_string());
            cols.year.push(year);
            cols.nights_spent
                .push((region.nights * (1.0 + 0.02 * t) * shock * rng.gauss(1.0, 0.02)).round());
            cols.gdp.push(region.gdp * (1.0 + 0.015 * t) * rng.gauss(1.0, 0.01));
            cols.pop.push((region.pop * (1.0 + 0.003 * t)).round());
            let emp = (region.employment + 0.004 * t + rng.gauss(0.0, 0.005)).min(0.95);
            cols.employment_rate.push(emp);
            cols.unemployment.push(((1.0 - emp) * 0.4).max(0.01));

            let moved = (shares[0] * 0.02).min(shares[0]);
            shares[0] -= moved;
            shares[3] += moved;
            let total: f64 = shares.iter().sum();
            for (col, share) in cols.climate.iter_mut().zip(shares.iter()) {
                col.push(share / total);
            }
        }
    }
    cols
}

fn to_batch(cols: &Columns) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("geo", DataType::Utf8, false),
        Field::new("year", DataType::Int64, false),
        Field::new("nights_spent", DataType::Float64, true),
        Field::new("gdp", DataType::Float64, true),
        Field::new("pop", DataType::Float64, true),
        Field::new("employment_rate", DataType::Float64, true),
        Field::new("unemployment", DataType::Float64, true),
    ];
    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(cols.geo.clone())),
        Arc::new(Int64Array::from(cols.year.clone())),
        Arc::new(Float64Array::from(cols.nights_spent.clone())),
        Arc::new(Float64Array::from(cols.gdp.clone())),
        Arc::new(Float64Array::from(cols.pop.clone())),
        Arc::new(Float64Array::from(cols.employment_rate.clone())),
        Arc::new(Float64Array::from(cols.unemployment.clone())),
    ];
    for (code, values) in CODES.iter().zip(&cols.climate) {
        fields.push(Field::new(format!("pct_{code}"), DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(values.clone())));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).context("building record batch")
}

fn write_parquet(batch: &RecordBatch, path: &str) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn write_csv(cols: &Columns, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;

    let mut header: Vec<String> = [
        "geo",
        "year",
        "nights_spent",
        "gdp",
        "pop",
        "employment_rate",
        "unemployment",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(CODES.iter().map(|c| format!("pct_{c}")));
    writer.write_record(&header)?;

    for i in 0..cols.geo.len() {
        let mut record = vec![
            cols.geo[i].clone(),
            cols.year[i].to_string(),
            cols.nights_spent[i].to_string(),
            cols.gdp[i].to_string(),
            cols.pop[i].to_string(),
            cols.employment_rate[i].to_string(),
            cols.unemployment[i].to_string(),
        ];
        record.extend(cols.climate.iter().map(|c| c[i].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);
    let batch = to_batch(&cols)?;

    write_parquet(&batch, "sample_merged.parquet")?;
    write_csv(&cols, "sample_merged.csv")?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!(
        "Wrote {} rows ({} regions × {} years) to sample_merged.parquet and sample_merged.csv",
        batch.num_rows(),
        REGIONS.len(),
        YEARS.count()
    );
    Ok(())
}
