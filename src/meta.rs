use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_FRAME_RATE: f64 = 50.0;

/// Static enrichment metadata loaded once per run and copied into every
/// report row. Keys follow the recording rig's meta.json convention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    #[serde(rename = "ROBOT_ID")]
    pub robot_id: String,
    #[serde(rename = "OPERATOR_ID")]
    pub operator_id: String,
    #[serde(rename = "LINK")]
    pub link: String,
    #[serde(rename = "NOTE")]
    pub note: String,
    #[serde(rename = "ENVIRONMENT")]
    pub environment: String,
    #[serde(rename = "SOFTWARE_VERSION")]
    pub software_version: String,
    #[serde(rename = "FRAME_RATE")]
    pub frame_rate: f64,
    #[serde(rename = "TARGET_ITEM")]
    pub target_item: String,
    #[serde(rename = "TARGET_AREA")]
    pub target_area: String,
    #[serde(rename = "DATA_TYPE")]
    pub data_type: String,
    #[serde(rename = "DATA_DESCRIPTION")]
    pub data_description: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            robot_id: String::new(),
            operator_id: String::new(),
            link: String::new(),
            note: String::new(),
            environment: String::new(),
            software_version: String::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            target_item: String::new(),
            target_area: String::new(),
            data_type: String::new(),
            data_description: String::new(),
        }
    }
}

pub fn load_meta_config(path: &Path) -> Result<MetaConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read meta config {}", path.display()))?;
    let meta: MetaConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse meta config {}", path.display()))?;
    if !(meta.frame_rate > 0.0) {
        bail!(
            "FRAME_RATE in {} must be positive, got {}",
            path.display(),
            meta.frame_rate
        );
    }
    Ok(meta)
}
