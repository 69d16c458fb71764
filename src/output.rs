use crate::cli::ReportFormat;
use crate::model::SyncRecord;
use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_report(
    records: &[SyncRecord],
    path: &Path,
    format: &ReportFormat,
) -> anyhow::Result<()> {
    match format {
        ReportFormat::Json => {
            let mut f = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            writeln!(f, "{}", serde_json::to_string_pretty(records)?)?;
        }
        ReportFormat::Csv => {
            let mut wtr = csv::Writer::from_path(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
    }
    println!(
        "Sync report with {} records saved to {}",
        records.len(),
        path.display()
    );
    Ok(())
}
