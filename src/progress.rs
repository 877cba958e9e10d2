use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum ProgressMode {
    Auto,
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedProgressMode {
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressConfig {
    pub mode: ProgressMode,
    tty_override: Option<bool>,
}

impl ProgressConfig {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            tty_override: None,
        }
    }

    #[cfg(test)]
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.tty_override = Some(is_tty);
        self
    }

    pub fn resolve_mode(self) -> ResolvedProgressMode {
        self.mode.resolve(
            self.tty_override
                .unwrap_or_else(|| std::io::stderr().is_terminal()),
        )
    }
}

impl ProgressMode {
    fn resolve(self, stderr_is_tty: bool) -> ResolvedProgressMode {
        match self {
            ProgressMode::Auto => {
                if stderr_is_tty {
                    ResolvedProgressMode::Rich
                } else {
                    ResolvedProgressMode::Plain
                }
            }
            ProgressMode::Rich => ResolvedProgressMode::Rich,
            ProgressMode::Plain => ResolvedProgressMode::Plain,
            ProgressMode::Quiet => ResolvedProgressMode::Quiet,
        }
    }
}

/// Per-folder progress observer for a corpus scan. Rich mode drives an
/// indicatif bar; plain mode prints `[PROGRESS]` lines to stderr; quiet mode
/// emits nothing. Core aggregation never depends on this.
pub struct ScanProgress {
    label: String,
    mode: ResolvedProgressMode,
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    pub fn new(label: impl Into<String>, total_folders: u64, config: ProgressConfig) -> Self {
        let label = label.into();
        let mode = config.resolve_mode();
        let bar = if mode == ResolvedProgressMode::Rich {
            let pb = ProgressBar::new(total_folders.max(1));
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} folders | {msg}",
                )
                .expect("valid progress template"),
            );
            pb.set_message(format!("{label} starting"));
            Some(pb)
        } else {
            None
        };
        Self { label, mode, bar }
    }

    /// Called once per completed folder with the running corpus totals.
    pub fn folder_done(&self, name: &str, files: usize, total_frames: u64, total_segments: u64) {
        match self.mode {
            ResolvedProgressMode::Rich => {
                if let Some(bar) = &self.bar {
                    bar.set_message(format!(
                        "{name} files={files} frames={total_frames} segments={total_segments}"
                    ));
                    bar.inc(1);
                }
            }
            ResolvedProgressMode::Plain => {
                eprintln!(
                    "[PROGRESS] {} folder={} files={} frames={} segments={}",
                    self.label, name, files, total_frames, total_segments
                );
            }
            ResolvedProgressMode::Quiet => {}
        }
    }

    pub fn warn(&self, message: &str) {
        match self.mode {
            ResolvedProgressMode::Rich => {
                if let Some(bar) = &self.bar {
                    bar.println(format!("[WARN] {}: {}", self.label, message));
                }
            }
            ResolvedProgressMode::Plain => {
                eprintln!("[WARN] {}: {}", self.label, message);
            }
            ResolvedProgressMode::Quiet => {}
        }
    }

    pub fn finish(&self, final_message: &str) {
        match self.mode {
            ResolvedProgressMode::Rich => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(final_message.to_string());
                }
            }
            ResolvedProgressMode::Plain => {
                eprintln!("[DONE] {}: {}", self.label, final_message);
            }
            ResolvedProgressMode::Quiet => {}
        }
    }
}
