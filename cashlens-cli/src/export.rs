use anyhow::{Context, Result};
use cashlens_core::ChartPoint;
use std::io;
use std::path::Path;

/// Write the monthly chart series as CSV (month,income,expenses,balance)
pub fn write_chart_csv<W: io::Write>(writer: W, points: &[ChartPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_chart_csv_file(path: &Path, points: &[ChartPoint]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_chart_csv(file, points).with_context(|| format!("write {}", path.display()))
}
