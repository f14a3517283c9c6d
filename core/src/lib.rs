//! Event reconstruction core for the LHCO di-Higgs feature pipeline.
//!
//! Raw LHCO object lines are classified into typed physics objects, grouped
//! into events, enriched with derived kinematics and a Higgs-pair hypothesis,
//! passed through the cutflow, and rendered as fixed-precision feature rows.

pub mod lhco_interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{AnalysisConfig, ProcessingStage, StageError, StageResult};
