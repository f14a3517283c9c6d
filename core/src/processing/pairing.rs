//! Higgs-pair reconstruction from exactly four b-jets.
//!
//! The four jets are split into two pairs in each of the three possible ways.
//! Every split is scored with
//!
//! ```text
//! chi = sqrt(((m_H - m_a) / (r * m_a))^2 + ((m_H - m_b) / (r * m_b))^2)
//! ```
//!
//! where `m_a`, `m_b` are the pair masses. The resolution term is scaled by the
//! reconstructed pair mass, not by `m_H`; downstream training samples depend on
//! this normalization.

use crate::math::FourVector;
use crate::prelude::AnalysisConfig;
use crate::processing::event::HiggsPair;
use crate::telemetry::log::LogManager;

/// The three ways of splitting jets `{0, 1, 2, 3}` into two unordered pairs.
/// Evaluation follows this order and the first minimum wins ties.
pub const PAIRINGS: [[(usize, usize); 2]; 3] = [
    [(0, 1), (2, 3)],
    [(0, 2), (1, 3)],
    [(0, 3), (1, 2)],
];

/// Discriminant for two pair masses; `None` unless both masses are strictly positive.
pub fn chi_hh(m_a: f64, m_b: f64, config: &AnalysisConfig) -> Option<f64> {
    if !(m_a > 0.0 && m_b > 0.0) {
        return None;
    }
    let a = (config.higgs_mass - m_a) / (config.mass_resolution * m_a);
    let b = (config.higgs_mass - m_b) / (config.mass_resolution * m_b);
    Some((a * a + b * b).sqrt())
}

/// Scores one pairing. Spacelike or massless pairs leave it unscored.
fn score(
    index: usize,
    systems: [FourVector; 2],
    config: &AnalysisConfig,
    logger: &LogManager,
) -> Option<f64> {
    let mut masses = [0.0; 2];
    for (mass, system) in masses.iter_mut().zip(systems.iter()) {
        match system.mass() {
            Ok(value) => *mass = value,
            Err(err) => {
                logger.warn(&format!("pairing {} not scored: {}", index, err));
                return None;
            }
        }
    }
    chi_hh(masses[0], masses[1], config)
}

/// Picks the pairing with the smallest discriminant and orders its pairs by
/// transverse momentum (the first pair leads on an exact tie).
pub fn reconstruct(bjets: &[FourVector; 4], config: &AnalysisConfig) -> Option<HiggsPair> {
    let logger = LogManager::new("pairing");
    let mut best: Option<(usize, f64, [FourVector; 2])> = None;

    for (index, pairs) in PAIRINGS.iter().enumerate() {
        let [(a, b), (c, d)] = *pairs;
        let systems = [bjets[a] + bjets[b], bjets[c] + bjets[d]];
        let Some(chi) = score(index, systems, config, &logger) else {
            continue;
        };
        let improves = match best {
            Some((_, best_chi, _)) => chi < best_chi,
            None => true,
        };
        if improves {
            best = Some((index, chi, systems));
        }
    }

    best.map(|(pairing, chi, [first, second])| {
        let (leading, subleading) = if first.pt() >= second.pt() {
            (first, second)
        } else {
            (second, first)
        };
        HiggsPair {
            pairing,
            chi,
            leading,
            subleading,
        }
    })
}
