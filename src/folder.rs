use crate::episode::{self, EpisodeStat, SegmentPolicy};

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const EPISODE_EXTENSION: &str = "npz";

/// Batch scans skip unreadable files and tolerate missing label arrays;
/// single-folder analysis fails the whole folder on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    Lenient,
    Strict,
}

/// Aggregated statistics for one dataset folder. Warnings collect the paths
/// of skipped files plus the per-folder zero-file and zero-segment notices,
/// so callers can inspect a folder's error list without printing.
#[derive(Debug, Clone, Default)]
pub struct FolderStats {
    pub files_found: usize,
    pub files_read: usize,
    pub frame_count: u64,
    pub segment_count: u64,
    pub warnings: Vec<String>,
}

/// All episode files beneath the folder, any depth, in sorted order. Order
/// only matters for reproducible output; the totals are commutative sums.
pub fn find_episode_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in WalkDir::new(folder) {
        let entry = entry.with_context(|| format!("failed to walk {}", folder.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_episode = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(EPISODE_EXTENSION))
            .unwrap_or(false);
        if is_episode {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

pub fn aggregate_folder(folder: &Path, mode: AggregateMode) -> Result<FolderStats> {
    let files = find_episode_files(folder)?;
    if files.is_empty() && mode == AggregateMode::Strict {
        bail!(
            "no episode files (*.{}) found under {}",
            EPISODE_EXTENSION,
            folder.display()
        );
    }

    let segments = match mode {
        AggregateMode::Lenient => SegmentPolicy::Optional,
        AggregateMode::Strict => SegmentPolicy::Required,
    };

    let mut stats = FolderStats {
        files_found: files.len(),
        ..Default::default()
    };

    for path in &files {
        match episode::read_episode_stats(path, segments) {
            Ok(EpisodeStat {
                frame_count,
                segment_count,
            }) => {
                stats.files_read += 1;
                stats.frame_count += frame_count;
                stats.segment_count += segment_count;
            }
            Err(err) if mode == AggregateMode::Lenient => {
                stats
                    .warnings
                    .push(format!("skipping {}: {err:#}", path.display()));
            }
            Err(err) => return Err(err),
        }
    }

    if stats.files_found == 0 {
        stats.warnings.push(format!(
            "no episode files (*.{}) found under {}",
            EPISODE_EXTENSION,
            folder.display()
        ));
    } else if stats.segment_count == 0 {
        stats
            .warnings
            .push(format!("no segment labels found under {}", folder.display()));
    }

    Ok(stats)
}
