use crate::lhco_interface::{Candidate, Jet, Lepton};
use crate::math::FourVector;

/// Missing transverse energy of an event in polar and Cartesian form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetSummary {
    pub et: f64,
    pub phi: f64,
    pub ex: f64,
    pub ey: f64,
}

impl MetSummary {
    pub fn unset(sentinel: f64) -> Self {
        Self {
            et: sentinel,
            phi: sentinel,
            ex: sentinel,
            ey: sentinel,
        }
    }

    pub fn from_polar(et: f64, phi: f64) -> Self {
        Self {
            et,
            phi,
            ex: et * phi.cos(),
            ey: et * phi.sin(),
        }
    }
}

/// Scalars computed by the derived-feature stage. Unmet preconditions leave the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub met_sig: f64,
    pub dphi_met_b: [f64; 4],
    pub chi_hh_min: f64,
    pub hh_mass: f64,
    pub hh_deta: f64,
    pub hh_dphi: f64,
    pub hh_dr: f64,
    pub dphi_met_h1: f64,
    pub dphi_met_h2: f64,
}

impl DerivedFeatures {
    pub fn unset(sentinel: f64) -> Self {
        Self {
            met_sig: sentinel,
            dphi_met_b: [sentinel; 4],
            chi_hh_min: sentinel,
            hh_mass: sentinel,
            hh_deta: sentinel,
            hh_dphi: sentinel,
            hh_dr: sentinel,
            dphi_met_h1: sentinel,
            dphi_met_h2: sentinel,
        }
    }
}

/// Winning Higgs-pair hypothesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiggsPair {
    /// Position of the winning pairing in [`crate::processing::pairing::PAIRINGS`].
    pub pairing: usize,
    pub chi: f64,
    /// Candidate with the larger transverse momentum.
    pub leading: FourVector,
    pub subleading: FourVector,
}

/// One reconstructed collision.
///
/// Collections keep record order. `jets` holds every jet, `light_jets` and
/// `bjets` split it on the b-tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub photons: Vec<Candidate>,
    pub leptons: Vec<Lepton>,
    pub jets: Vec<Jet>,
    pub light_jets: Vec<Jet>,
    pub bjets: Vec<Jet>,
    pub taus: Vec<Candidate>,
    pub met: MetSummary,
    /// Scalar sum of jet transverse momenta.
    pub ht: f64,
    pub features: DerivedFeatures,
    pub higgs: Option<HiggsPair>,
    /// Number of cut sets passed; 0 means not selected.
    pub good: u32,
    derived: bool,
}

impl Event {
    pub fn new(sentinel: f64) -> Self {
        Self {
            photons: Vec::new(),
            leptons: Vec::new(),
            jets: Vec::new(),
            light_jets: Vec::new(),
            bjets: Vec::new(),
            taus: Vec::new(),
            met: MetSummary::unset(sentinel),
            ht: sentinel,
            features: DerivedFeatures::unset(sentinel),
            higgs: None,
            good: 0,
            derived: false,
        }
    }

    pub fn n_jets(&self) -> usize {
        self.jets.len()
    }

    pub fn n_bjets(&self) -> usize {
        self.bjets.len()
    }

    pub fn n_leptons(&self) -> usize {
        self.leptons.len()
    }

    pub fn n_taus(&self) -> usize {
        self.taus.len()
    }

    pub fn n_photons(&self) -> usize {
        self.photons.len()
    }

    pub fn is_derived(&self) -> bool {
        self.derived
    }

    pub(crate) fn mark_derived(&mut self) {
        self.derived = true;
    }

    pub fn is_selected(&self) -> bool {
        self.good > 0
    }
}
