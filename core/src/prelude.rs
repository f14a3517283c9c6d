use crate::math::KinematicsError;
use crate::processing::event::Event;
use serde::{Deserialize, Serialize};

/// Physics constants and selection thresholds shared by every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Target Higgs mass for the pairing discriminant (GeV).
    pub higgs_mass: f64,
    /// Fractional mass resolution used in the discriminant.
    pub mass_resolution: f64,
    /// Missing transverse energy cut (GeV, strict).
    pub met_threshold: f64,
    /// Transverse momentum cut on the fourth b-jet (GeV, strict).
    pub fourth_bjet_pt_threshold: f64,
    /// Placeholder carried by fields that could not be computed.
    pub sentinel: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            higgs_mass: 125.0,
            mass_resolution: 0.1,
            met_threshold: 200.0,
            fourth_bjet_pt_threshold: 20.0,
            sentinel: -999.0,
        }
    }
}

/// Common error type for reading and stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("format error on line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// A step of the per-event pipeline, configured once and run on each event.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &AnalysisConfig) -> StageResult<()>;
    fn execute(&mut self, event: &mut Event) -> StageResult<()>;
    fn cleanup(&mut self);
}
