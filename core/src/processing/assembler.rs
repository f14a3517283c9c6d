use crate::lhco_interface::{classify, EventBlock, PhysicsObject};
use crate::prelude::AnalysisConfig;
use crate::processing::event::{Event, MetSummary};
use crate::telemetry::log::LogManager;

/// Routes the classified objects of one block into the collections of an [`Event`].
pub struct EventAssembler {
    sentinel: f64,
    logger: LogManager,
}

impl EventAssembler {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            sentinel: config.sentinel,
            logger: LogManager::new("assembler"),
        }
    }

    pub fn assemble(&self, block: &EventBlock) -> Event {
        let mut event = Event::new(self.sentinel);

        for record in &block.records {
            match classify(record) {
                Some(PhysicsObject::Photon(photon)) => event.photons.push(photon),
                Some(PhysicsObject::Lepton(lepton)) => event.leptons.push(lepton),
                Some(PhysicsObject::Tau(tau)) => event.taus.push(tau),
                Some(PhysicsObject::Jet(jet)) => {
                    event.jets.push(jet);
                    if jet.btagged {
                        event.bjets.push(jet);
                    } else {
                        event.light_jets.push(jet);
                    }
                }
                // a later MET record replaces an earlier one
                Some(PhysicsObject::Met(met)) => event.met = MetSummary::from_polar(met.et, met.phi),
                None => self.logger.detail(&format!(
                    "event {}: ignoring object {} with type {}",
                    block.ordinal, record.index, record.type_code
                )),
            }
        }

        if !event.jets.is_empty() {
            event.ht = event.jets.iter().map(|jet| jet.candidate.pt).sum();
        }

        self.logger.detail(&format!(
            "event {}: {} jets ({} b), {} leptons, {} taus, {} photons",
            block.ordinal,
            event.n_jets(),
            event.n_bjets(),
            event.n_leptons(),
            event.n_taus(),
            event.n_photons()
        ));

        event
    }
}
