use crate::generator::template::{event_marker, LhcoObject, LHCO_HEADER};
use hhcore::lhco_interface::object::type_code;
use hhcore::math::wrap_angle;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const HIGGS_MASS: f64 = 125.0;

/// Configuration for generating synthetic LHCO samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub events: usize,
    pub seed: u64,
    /// Fraction of events built as two Higgs bosons decaying to b-jet pairs.
    pub signal_fraction: f64,
    /// Probability of adding one isolated lepton to an event.
    pub lepton_rate: f64,
    pub max_light_jets: usize,
    pub met_min: f64,
    pub met_max: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            events: 100,
            seed: 0,
            signal_fraction: 0.5,
            lepton_rate: 0.1,
            max_light_jets: 3,
            met_min: 50.0,
            met_max: 450.0,
        }
    }
}

/// Two massless b-jets at equal eta whose pair mass is the Higgs mass.
fn higgs_pair(rng: &mut StdRng) -> [LhcoObject; 2] {
    let pt = rng.gen_range(70.0..200.0);
    let eta = rng.gen_range(-2.0..2.0);
    let axis = rng.gen_range(-PI..PI);
    // m^2 = 2 pt^2 (1 - cos(dphi)) at equal eta
    let half = (1.0 - HIGGS_MASS * HIGGS_MASS / (2.0 * pt * pt)).acos() / 2.0;
    [
        LhcoObject::jet(eta, wrap_angle(axis + half), pt, true),
        LhcoObject::jet(eta, wrap_angle(axis - half), pt, true),
    ]
}

fn random_jet(rng: &mut StdRng, btagged: bool) -> LhcoObject {
    LhcoObject::jet(
        rng.gen_range(-2.5..2.5),
        rng.gen_range(-PI..PI),
        rng.gen_range(20.0..250.0),
        btagged,
    )
}

fn build_event(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<LhcoObject> {
    let mut objects = Vec::new();

    if rng.gen_bool(config.signal_fraction) {
        objects.extend(higgs_pair(rng));
        objects.extend(higgs_pair(rng));
    } else {
        let bjets = rng.gen_range(0..=5);
        objects.extend((0..bjets).map(|_| random_jet(rng, true)));
    }

    let light_jets = rng.gen_range(0..=config.max_light_jets);
    objects.extend((0..light_jets).map(|_| random_jet(rng, false)));

    if rng.gen_bool(config.lepton_rate) {
        let charge = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        objects.push(LhcoObject {
            type_code: if rng.gen_bool(0.5) {
                type_code::ELECTRON
            } else {
                type_code::MUON
            },
            eta: rng.gen_range(-2.5..2.5),
            phi: rng.gen_range(-PI..PI),
            pt: rng.gen_range(10.0..120.0),
            mass: 0.0,
            ntrk: charge,
            btag: 0.0,
        });
    }

    let met_phi = rng.gen_range(-PI..PI);
    objects.push(LhcoObject::met(met_phi, rng.gen_range(config.met_min..config.met_max)));
    objects
}

/// Renders a seeded synthetic sample in LHCO text format.
pub fn build_lhco_sample(config: &GeneratorConfig) -> anyhow::Result<String> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.signal_fraction),
        "signal fraction must lie in [0, 1], got {}",
        config.signal_fraction
    );
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.lepton_rate),
        "lepton rate must lie in [0, 1], got {}",
        config.lepton_rate
    );
    anyhow::ensure!(
        config.met_min < config.met_max,
        "empty MET range {}..{}",
        config.met_min,
        config.met_max
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut lines = vec![LHCO_HEADER.to_string()];

    for number in 1..=config.events {
        lines.push(event_marker(number, 0));
        for (index, object) in build_event(config, &mut rng).iter().enumerate() {
            lines.push(object.to_line(index + 1));
        }
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}
