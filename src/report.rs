use crate::record::{CorpusSummary, FolderRecord};
use crate::scanner::ScanOutcome;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SUMMARY_CSV: &str = "summary_episodes.csv";
pub const TOTALS_JSON: &str = "total_summary.json";
pub const ANALYSIS_CSV: &str = "analysis_summary.csv";

pub const CSV_HEADER: [&str; 15] = [
    "Task Name (Identifier)",
    "Total Time (seconds)",
    "Total Time (hours)",
    "Frame Count",
    "Frame Rate",
    "Robot ID",
    "Operator ID",
    "Segment Count",
    "Record Time",
    "Environment",
    "Software Version",
    "Target Item",
    "Link",
    "Note",
    "Data Description",
];

/// Writes the tabular report: one header row, then one row per record in the
/// order received. The header is written even for an empty record list.
pub fn write_summary_csv(path: &Path, records: &[FolderRecord]) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let file = File::create(&tmp)
            .with_context(|| format!("failed to create {}", tmp.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move report into place at {}", path.display()))?;
    Ok(())
}

pub fn write_totals_json(path: &Path, summary: &CorpusSummary) -> Result<()> {
    let tmp = tmp_path(path);
    let json = serde_json::to_string_pretty(summary)?;
    {
        let mut file = File::create(&tmp)
            .with_context(|| format!("failed to create {}", tmp.display()))?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move report into place at {}", path.display()))?;
    Ok(())
}

/// Emits both corpus artifacts into the output directory, overwriting any
/// previous run. Returns the (csv, json) paths.
pub fn write_reports(output_dir: &Path, outcome: &ScanOutcome) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    let csv_path = output_dir.join(SUMMARY_CSV);
    write_summary_csv(&csv_path, &outcome.records)?;
    let json_path = output_dir.join(TOTALS_JSON);
    write_totals_json(&json_path, &outcome.summary)?;
    Ok((csv_path, json_path))
}

// Reports are written beside their final name and renamed into place, so a
// crash mid-write never leaves a truncated report under the real name.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
