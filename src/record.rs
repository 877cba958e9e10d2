use crate::folder::FolderStats;
use crate::meta::MetaConfig;
use crate::util;

use serde::Serialize;

/// One report row: a dataset folder's aggregated statistics plus the
/// enrichment fields copied from the meta config. Field order matches the
/// CSV column order. Created once per folder scan, immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct FolderRecord {
    pub task_name: String,
    pub total_seconds: f64,
    pub total_hours: f64,
    pub frame_count: u64,
    pub frame_rate: f64,
    pub robot_id: String,
    pub operator_id: String,
    pub segment_count: u64,
    pub record_time: String,
    pub environment: String,
    pub software_version: String,
    pub target_item: String,
    pub link: String,
    pub note: String,
    pub data_description: String,
    /// Per-folder failure list, surfaced for inspection but never serialized.
    #[serde(skip_serializing)]
    pub warnings: Vec<String>,
}

impl FolderRecord {
    pub fn new(
        task_name: String,
        stats: &FolderStats,
        meta: &MetaConfig,
        record_time: String,
    ) -> Self {
        let total_seconds = stats.frame_count as f64 / meta.frame_rate;
        Self {
            task_name,
            total_seconds,
            total_hours: total_seconds / 3600.0,
            frame_count: stats.frame_count,
            frame_rate: meta.frame_rate,
            robot_id: meta.robot_id.clone(),
            operator_id: meta.operator_id.clone(),
            segment_count: stats.segment_count,
            record_time,
            environment: meta.environment.clone(),
            software_version: meta.software_version.clone(),
            target_item: meta.target_item.clone(),
            link: meta.link.clone(),
            note: meta.note.clone(),
            data_description: meta.data_description.clone(),
            warnings: stats.warnings.clone(),
        }
    }
}

/// Corpus-wide totals, recomputed fresh each run. Key names match the JSON
/// totals document.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    pub total_folders_analyzed: usize,
    pub total_action_steps: u64,
    pub total_action_segments: u64,
    pub total_time_seconds: f64,
    pub total_time_hours: f64,
    pub record_time: String,
}

impl CorpusSummary {
    /// Seconds and hours are derived from the summed frame count rather than
    /// summed per-folder floats, so total_time_seconds is exactly
    /// total_action_steps / frame_rate.
    pub fn new(
        folders: usize,
        frame_count: u64,
        segment_count: u64,
        frame_rate: f64,
        record_time: String,
    ) -> Self {
        let seconds = frame_count as f64 / frame_rate;
        Self {
            total_folders_analyzed: folders,
            total_action_steps: frame_count,
            total_action_segments: segment_count,
            total_time_seconds: util::round2(seconds),
            total_time_hours: util::round2(seconds / 3600.0),
            record_time,
        }
    }
}
