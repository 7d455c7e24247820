use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const OUTPUT_STEM: &str = "spacex_launch_dash";

/// Sites with their share of launches, in dropdown order.
const SITES: [(&str, u32); 4] = [
    ("CCAFS LC-40", 26),
    ("VAFB SLC-4E", 10),
    ("KSC LC-39A", 13),
    ("CCAFS SLC-40", 7),
];

/// Booster generations in flight order:
/// (category, flights, success probability, max payload kg).
const BOOSTERS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.2, 700.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.65, 9600.0),
    ("B4", 8, 0.55, 7000.0),
    ("B5", 4, 0.9, 6000.0),
];

/// One generated row, serialized with the reference column names.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// Deterministic splitmix64 stream; the same seed always yields the same file.
struct LaunchRng(u64);

impl LaunchRng {
    fn seeded(seed: u64) -> Self {
        LaunchRng(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Whole kilograms in `[0, max]`.
    fn payload(&mut self, max: f64) -> f64 {
        (self.unit() * max).round()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Index into `SITES`, drawn by launch share.
    fn site(&mut self) -> usize {
        let total: u32 = SITES.iter().map(|(_, share)| share).sum();
        let mut pick = self.next_u64() % u64::from(total);
        for (i, (_, share)) in SITES.iter().enumerate() {
            let share = u64::from(*share);
            if pick < share {
                return i;
            }
            pick -= share;
        }
        SITES.len() - 1
    }
}

fn generate(rng: &mut LaunchRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for (category, flights, p_success, max_payload) in BOOSTERS {
        for serial in 0..flights {
            let (site, _) = SITES[rng.site()];
            // The earliest flights carried no payload.
            let payload_mass = if flight_number <= 2 {
                0.0
            } else {
                rng.payload(max_payload)
            };
            let class = i64::from(rng.chance(p_success));
            let core = 1000 + flight_number * 3 + serial as i64;

            rows.push(LaunchRow {
                flight_number,
                launch_site: site,
                class,
                payload_mass,
                booster_version: format!("F9 {category} B{core}"),
                booster_category: category,
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(rows: &[LaunchRow], path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, rows).context("writing JSON")?;
    Ok(())
}

fn to_record_batch(rows: &[LaunchRow]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_category))),
        ],
    )
    .context("building record batch")
}

fn write_parquet(batch: &RecordBatch, path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = LaunchRng::seeded(42);
    let rows = generate(&mut rng);

    let csv_path = format!("{OUTPUT_STEM}.csv");
    let json_path = format!("{OUTPUT_STEM}.json");
    let parquet_path = format!("{OUTPUT_STEM}.parquet");

    write_csv(&rows, &csv_path)?;
    write_json(&rows, &json_path)?;
    let batch = to_record_batch(&rows)?;
    write_parquet(&batch, &parquet_path)?;

    let preview = pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])
        .context("formatting preview")?;
    println!("{preview}");
    println!(
        "Wrote {} launches to {csv_path}, {json_path} and {parquet_path}",
        rows.len()
    );
    Ok(())
}
