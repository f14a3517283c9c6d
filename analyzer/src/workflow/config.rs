use anyhow::Context;
use hhcore::processing::FeatureMode;
use hhcore::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Label written first on every row (0 for background, 1 for signal).
    pub event_type: i64,
    #[serde(default)]
    pub features: FeatureMode,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(event_type: i64, features: FeatureMode) -> Self {
        Self {
            event_type,
            features,
            analysis: AnalysisConfig::default(),
        }
    }
}
