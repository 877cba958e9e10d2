mod episode;
mod folder;
mod meta;
mod progress;
mod record;
mod report;
mod scanner;
#[cfg(test)]
mod testutil;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folder::AggregateMode;
use progress::{ProgressConfig, ProgressMode, ScanProgress};
use record::FolderRecord;
use scanner::ScanOutcome;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "epitally",
    version,
    about = "Aggregate robot-teleoperation episode recordings into dataset summary reports"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Batch-scan every dataset folder under a root directory and write
    /// corpus-wide CSV and JSON reports
    Scan {
        root_dir: PathBuf,

        /// Output directory for the CSV and JSON reports
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Path to the meta.json enrichment document
        #[arg(long, default_value = "config/meta.json")]
        meta: PathBuf,

        /// Progress display mode: auto (TTY-aware), rich, plain, quiet.
        #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
        progress: ProgressMode,
    },

    /// Analyze a single dataset folder strictly and print its summary
    Analyze {
        data_dir: PathBuf,

        /// Path to the meta.json enrichment document
        #[arg(long, default_value = "config/meta.json")]
        meta: PathBuf,

        /// Where to write the one-row summary CSV (defaults to the analyzed folder)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Scan {
            root_dir,
            output_dir,
            meta,
            progress,
        } => {
            let meta = meta::load_meta_config(&meta)?;
            let folders = scanner::list_dataset_folders(&root_dir, &scanner::is_excluded_name)?;

            eprintln!(
                "Scan plan: root={} folders={} frame_rate={} robot={} operator={} type={} area={}",
                root_dir.display(),
                folders.len(),
                meta.frame_rate,
                meta.robot_id,
                meta.operator_id,
                meta.data_type,
                meta.target_area,
            );

            let progress = ScanProgress::new(
                "scan",
                folders.len() as u64,
                ProgressConfig::new(progress),
            );
            let outcome = scanner::scan_folders(&folders, &meta, &progress)?;
            progress.finish("scan complete");

            let (csv_path, json_path) = report::write_reports(&output_dir, &outcome)?;
            print_scan_summary(&outcome);
            println!("Summary CSV saved to: {}", csv_path.display());
            println!("Summary JSON saved to: {}", json_path.display());
        }

        Commands::Analyze {
            data_dir,
            meta,
            output_dir,
        } => {
            let meta = meta::load_meta_config(&meta)?;
            let stats = folder::aggregate_folder(&data_dir, AggregateMode::Strict)?;
            let record = FolderRecord::new(
                util::folder_basename(&data_dir),
                &stats,
                &meta,
                util::timestamp_now(),
            );
            print_analysis_summary(&record, stats.files_found);

            let out_dir = output_dir.unwrap_or_else(|| data_dir.clone());
            std::fs::create_dir_all(&out_dir)?;
            let csv_path = out_dir.join(report::ANALYSIS_CSV);
            report::write_summary_csv(&csv_path, std::slice::from_ref(&record))?;
            println!("Analysis CSV saved to: {}", csv_path.display());
            print!("{}", std::fs::read_to_string(&csv_path)?);
        }
    }

    Ok(())
}

fn print_scan_summary(outcome: &ScanOutcome) {
    let summary = &outcome.summary;
    println!(
        "Scan summary: folders={} frames={} segments={} seconds={:.2} hours={:.2}",
        summary.total_folders_analyzed,
        summary.total_action_steps,
        summary.total_action_segments,
        summary.total_time_seconds,
        summary.total_time_hours,
    );
    for record in &outcome.records {
        for warning in &record.warnings {
            println!("  warning: {warning}");
        }
    }
}

fn print_analysis_summary(record: &FolderRecord, files_found: usize) {
    println!(
        "Analysis summary: folder={} files={} frames={} segments={} seconds={:.2} hours={:.4} frame_rate={}",
        record.task_name,
        files_found,
        record.frame_count,
        record.segment_count,
        record.total_seconds,
        record.total_hours,
        record.frame_rate,
    );
}
