use crate::lhco_interface::record::RawRecord;
use crate::math::FourVector;

/// LHCO type codes.
pub mod type_code {
    pub const PHOTON: i64 = 0;
    pub const ELECTRON: i64 = 1;
    pub const MUON: i64 = 2;
    pub const TAU: i64 = 3;
    pub const JET: i64 = 4;
    pub const MET: i64 = 6;
}

/// Detector-level kinematics shared by every reconstructed object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub mass: f64,
    pub p4: FourVector,
}

impl Candidate {
    pub fn new(eta: f64, phi: f64, pt: f64, mass: f64) -> Self {
        Self {
            eta,
            phi,
            pt,
            mass,
            p4: FourVector::from_pt_eta_phi_m(pt, eta, phi, mass),
        }
    }

    fn from_record(record: &RawRecord) -> Self {
        Self::new(record.eta, record.phi, record.pt, record.mass)
    }
}

/// Electron or muon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lepton {
    pub candidate: Candidate,
    pub charge: i8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet {
    pub candidate: Candidate,
    pub btagged: bool,
}

/// Missing transverse energy marker; only magnitude and azimuth are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingEt {
    pub et: f64,
    pub phi: f64,
}

/// Closed set of objects an LHCO line can describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsObject {
    Photon(Candidate),
    Lepton(Lepton),
    Tau(Candidate),
    Jet(Jet),
    Met(MissingEt),
}

/// Turns a parsed record into a typed object. Unknown type codes yield `None`.
pub fn classify(record: &RawRecord) -> Option<PhysicsObject> {
    let object = match record.type_code {
        type_code::PHOTON => PhysicsObject::Photon(Candidate::from_record(record)),
        type_code::ELECTRON | type_code::MUON => PhysicsObject::Lepton(Lepton {
            candidate: Candidate::from_record(record),
            charge: if record.track_count() > 0 { 1 } else { -1 },
        }),
        type_code::TAU => PhysicsObject::Tau(Candidate::from_record(record)),
        type_code::JET => PhysicsObject::Jet(Jet {
            candidate: Candidate::from_record(record),
            btagged: record.is_btagged(),
        }),
        type_code::MET => PhysicsObject::Met(MissingEt {
            et: record.pt,
            phi: record.phi,
        }),
        _ => return None,
    };
    Some(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(type_code: i64, ntrk: f64, btag: f64) -> RawRecord {
        RawRecord {
            index: 1,
            type_code,
            eta: 0.5,
            phi: -0.7,
            pt: 64.0,
            mass: 5.0,
            track_count: ntrk,
            btag_flag: btag,
            had_em_ratio: 0.0,
            extra1: 0.0,
            extra2: 0.0,
        }
    }

    #[test]
    fn leptons_take_charge_from_track_sign() {
        match classify(&record(1, 1.0, 0.0)) {
            Some(PhysicsObject::Lepton(lepton)) => assert_eq!(lepton.charge, 1),
            other => panic!("expected lepton, got {other:?}"),
        }
        match classify(&record(2, -1.0, 0.0)) {
            Some(PhysicsObject::Lepton(lepton)) => assert_eq!(lepton.charge, -1),
            other => panic!("expected lepton, got {other:?}"),
        }
        match classify(&record(2, 0.0, 0.0)) {
            Some(PhysicsObject::Lepton(lepton)) => assert_eq!(lepton.charge, -1),
            other => panic!("expected lepton, got {other:?}"),
        }
    }

    #[test]
    fn jets_split_on_btag() {
        assert!(matches!(
            classify(&record(4, 5.0, 0.0)),
            Some(PhysicsObject::Jet(Jet { btagged: false, .. }))
        ));
        assert!(matches!(
            classify(&record(4, 5.0, 2.0)),
            Some(PhysicsObject::Jet(Jet { btagged: true, .. }))
        ));
    }

    #[test]
    fn met_keeps_only_magnitude_and_azimuth() {
        assert_eq!(
            classify(&record(6, 0.0, 0.0)),
            Some(PhysicsObject::Met(MissingEt { et: 64.0, phi: -0.7 }))
        );
    }

    #[test]
    fn unknown_codes_are_not_classified() {
        assert!(classify(&record(5, 0.0, 0.0)).is_none());
        assert!(classify(&record(-1, 0.0, 0.0)).is_none());
    }

    #[test]
    fn candidate_four_vector_follows_detector_coordinates() {
        let candidate = Candidate::new(0.0, 0.0, 3.0, 4.0);
        assert!((candidate.p4.e - 5.0).abs() < 1e-12);
        assert!((candidate.p4.px - 3.0).abs() < 1e-12);
    }
}
