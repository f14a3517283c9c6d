use crate::math::{delta_eta, delta_phi, delta_r, invariant_mass, FourVector};
use crate::prelude::{AnalysisConfig, ProcessingStage, StageError, StageResult};
use crate::processing::event::Event;
use crate::processing::pairing;
use crate::telemetry::log::LogManager;

/// Computes MET significance, MET/b-jet angles and the Higgs-pair observables.
pub struct DerivedStage {
    config: Option<AnalysisConfig>,
    logger: LogManager,
}

impl DerivedStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("derived"),
        }
    }
}

impl Default for DerivedStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for DerivedStage {
    fn initialize(&mut self, config: &AnalysisConfig) -> StageResult<()> {
        if !(config.mass_resolution > 0.0) {
            return Err(StageError::InvalidInput(format!(
                "mass resolution must be positive, got {}",
                config.mass_resolution
            )));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, event: &mut Event) -> StageResult<()> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if event.is_derived() {
            return Err(StageError::InvalidInput(
                "derived features already computed".into(),
            ));
        }

        let sum_bjet_pt: f64 = event.bjets.iter().map(|jet| jet.candidate.pt).sum();
        if sum_bjet_pt > 0.0 {
            event.features.met_sig = event.met.et / sum_bjet_pt.sqrt();
        }

        for (slot, jet) in event.features.dphi_met_b.iter_mut().zip(&event.bjets) {
            *slot = delta_phi(event.met.phi, jet.candidate.phi);
        }

        if let Ok(bjets) = <[_; 4]>::try_from(event.bjets.as_slice()) {
            let momenta: [FourVector; 4] = bjets.map(|jet| jet.candidate.p4);
            match pairing::reconstruct(&momenta, config) {
                Some(pair) => {
                    let (h1, h2) = (pair.leading, pair.subleading);
                    let features = &mut event.features;
                    features.chi_hh_min = pair.chi;
                    match invariant_mass(&[h1, h2]) {
                        Ok(mass) => features.hh_mass = mass,
                        Err(err) => self.logger.warn(&format!("HH mass not computed: {}", err)),
                    }
                    features.hh_deta = delta_eta(h1.eta(), h2.eta());
                    features.hh_dphi = delta_phi(h1.phi(), h2.phi());
                    features.hh_dr = delta_r(h1.eta(), h1.phi(), h2.eta(), h2.phi());
                    features.dphi_met_h1 = delta_phi(event.met.phi, h1.phi());
                    features.dphi_met_h2 = delta_phi(event.met.phi, h2.phi());
                    event.higgs = Some(pair);
                }
                None => self
                    .logger
                    .warn("no pairing of the four b-jets could be scored"),
            }
        }

        event.mark_derived();
        Ok(())
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
