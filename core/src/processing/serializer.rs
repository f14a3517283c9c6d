use crate::prelude::{StageError, StageResult};
use crate::processing::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LOW_LEVEL_FEATURES: usize = 15;
pub const HIGH_LEVEL_FEATURES: usize = 18;

/// Which feature groups a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    Low,
    High,
    #[default]
    All,
}

impl FeatureMode {
    pub fn width(&self) -> usize {
        match self {
            FeatureMode::Low => LOW_LEVEL_FEATURES,
            FeatureMode::High => HIGH_LEVEL_FEATURES,
            FeatureMode::All => LOW_LEVEL_FEATURES + HIGH_LEVEL_FEATURES,
        }
    }
}

impl FromStr for FeatureMode {
    type Err = StageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(FeatureMode::Low),
            "high" => Ok(FeatureMode::High),
            "all" => Ok(FeatureMode::All),
            other => Err(StageError::InvalidInput(format!(
                "unknown feature mode {:?} (expected low, high or all)",
                other
            ))),
        }
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureMode::Low => "low",
            FeatureMode::High => "high",
            FeatureMode::All => "all",
        };
        f.write_str(name)
    }
}

/// Light-jet count, `(eta, phi, pt)` of the first four b-jets, MET azimuth and magnitude.
pub fn low_level_features(event: &Event) -> StageResult<Vec<f64>> {
    if event.n_bjets() < 4 {
        return Err(StageError::InvalidInput(format!(
            "low-level features need four b-jets, event has {}",
            event.n_bjets()
        )));
    }

    let mut values = Vec::with_capacity(LOW_LEVEL_FEATURES);
    values.push(event.light_jets.len() as f64);
    for jet in &event.bjets[..4] {
        values.extend([jet.candidate.eta, jet.candidate.phi, jet.candidate.pt]);
    }
    values.extend([event.met.phi, event.met.et]);
    Ok(values)
}

/// Higgs-candidate kinematics and derived angles; an unreconstructed pair reads as `sentinel`.
pub fn high_level_features(event: &Event, sentinel: f64) -> Vec<f64> {
    let candidates = match &event.higgs {
        Some(pair) => [
            pair.leading.eta(),
            pair.leading.phi(),
            pair.leading.pt(),
            pair.subleading.eta(),
            pair.subleading.phi(),
            pair.subleading.pt(),
        ],
        None => [sentinel; 6],
    };

    let f = &event.features;
    let mut values = Vec::with_capacity(HIGH_LEVEL_FEATURES);
    values.extend(candidates);
    values.extend([f.hh_mass, f.hh_deta, f.hh_dphi, f.hh_dr, f.met_sig]);
    values.extend(f.dphi_met_b);
    values.extend([f.dphi_met_h1, f.dphi_met_h2, f.chi_hh_min]);
    values
}

/// `"<label>, v1, v2, ..."` with five decimals per value.
pub fn format_row(label: i64, values: &[f64]) -> String {
    let mut row = label.to_string();
    for value in values {
        row.push_str(&format!(", {:.5}", value));
    }
    row
}

/// Renders selected events as text rows.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSerializer {
    mode: FeatureMode,
    label: i64,
    sentinel: f64,
}

impl FeatureSerializer {
    pub fn new(mode: FeatureMode, label: i64, sentinel: f64) -> Self {
        Self {
            mode,
            label,
            sentinel,
        }
    }

    pub fn features(&self, event: &Event) -> StageResult<Vec<f64>> {
        let values = match self.mode {
            FeatureMode::Low => low_level_features(event)?,
            FeatureMode::High => high_level_features(event, self.sentinel),
            FeatureMode::All => {
                let mut values = low_level_features(event)?;
                values.extend(high_level_features(event, self.sentinel));
                values
            }
        };
        Ok(values)
    }

    /// Row for a selected event, `None` for events that failed the cutflow.
    pub fn serialize(&self, event: &Event) -> StageResult<Option<String>> {
        if !event.is_selected() {
            return Ok(None);
        }
        let values = self.features(event)?;
        Ok(Some(format_row(self.label, &values)))
    }
}
