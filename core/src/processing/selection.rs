use crate::prelude::{AnalysisConfig, ProcessingStage, StageError, StageResult};
use crate::processing::event::Event;
use crate::telemetry::log::LogManager;

/// A named selection; an event's `good` counter is the number of cut sets it passes.
pub struct CutSet {
    pub name: &'static str,
    pub passes: fn(&Event, &AnalysisConfig) -> bool,
}

/// Exactly four b-jets, no leptons or taus, large MET and a hard fourth b-jet.
fn four_bjets_plus_met(event: &Event, config: &AnalysisConfig) -> bool {
    event.n_bjets() == 4
        && event.n_leptons() == 0
        && event.n_taus() == 0
        && event.met.et > config.met_threshold
        && event.bjets[3].candidate.pt > config.fourth_bjet_pt_threshold
}

pub const CUT_SETS: &[CutSet] = &[CutSet {
    name: "4b_met",
    passes: four_bjets_plus_met,
}];

/// Evaluates the cutflow on events whose derived features are already in place.
pub struct SelectionStage {
    config: Option<AnalysisConfig>,
    logger: LogManager,
}

impl SelectionStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("selection"),
        }
    }
}

impl Default for SelectionStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for SelectionStage {
    fn initialize(&mut self, config: &AnalysisConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, event: &mut Event) -> StageResult<()> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if !event.is_derived() {
            return Err(StageError::InvalidInput(
                "selection requires derived features".into(),
            ));
        }

        event.good = 0;
        for cut in CUT_SETS {
            if (cut.passes)(event, config) {
                event.good += 1;
                self.logger.detail(&format!("passed {}", cut.name));
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
