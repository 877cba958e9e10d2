use crate::folder::{self, AggregateMode};
use crate::meta::MetaConfig;
use crate::progress::ScanProgress;
use crate::record::{CorpusSummary, FolderRecord};
use crate::util;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const EXCLUDED_MARKERS: [&str; 3] = ["temp", "test", "backup"];
const TRASH_MARKER: &str = ".Trash";

/// Name-based filter for dataset-folder candidates. Deliberately substring
/// matched and case-insensitive: a folder named "contest" or "latest" is an
/// accepted false positive of the "test" marker, traded for never scanning a
/// scratch directory by accident.
pub fn is_excluded_name(name: &str) -> bool {
    if name.starts_with('.') || name.contains(TRASH_MARKER) {
        return true;
    }
    let lower = name.to_lowercase();
    EXCLUDED_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Immediate subdirectories of the root that survive the exclusion
/// predicate, sorted by path. The predicate is pluggable so a stricter match
/// can replace `is_excluded_name` without touching the scan itself.
pub fn list_dataset_folders(root: &Path, exclude: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut folders = vec![];
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read root directory {}", root.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if exclude(&util::folder_basename(&path)) {
            continue;
        }
        folders.push(path);
    }
    folders.sort();
    Ok(folders)
}

pub struct ScanOutcome {
    pub records: Vec<FolderRecord>,
    pub summary: CorpusSummary,
}

/// Aggregates every folder sequentially, appending one record per folder in
/// the order given and keeping running corpus totals. Memory use is bounded
/// by folder count, not file count. A folder with zero episode files still
/// gets a zero-count row.
pub fn scan_folders(
    folders: &[PathBuf],
    meta: &MetaConfig,
    progress: &ScanProgress,
) -> Result<ScanOutcome> {
    let mut records = Vec::with_capacity(folders.len());
    let mut total_frames = 0u64;
    let mut total_segments = 0u64;

    for path in folders {
        let stats = folder::aggregate_folder(path, AggregateMode::Lenient)?;
        for warning in &stats.warnings {
            progress.warn(warning);
        }

        total_frames += stats.frame_count;
        total_segments += stats.segment_count;

        let record = FolderRecord::new(
            util::folder_basename(path),
            &stats,
            meta,
            util::timestamp_now(),
        );
        progress.folder_done(
            &record.task_name,
            stats.files_found,
            total_frames,
            total_segments,
        );
        records.push(record);
    }

    let summary = CorpusSummary::new(
        records.len(),
        total_frames,
        total_segments,
        meta.frame_rate,
        util::timestamp_now(),
    );
    Ok(ScanOutcome { records, summary })
}
