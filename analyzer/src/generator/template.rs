use hhcore::lhco_interface::object::type_code;

/// Column header written at the top of LHCO files.
pub const LHCO_HEADER: &str =
    "#  typ      eta      phi       pt     jmas   ntrk   btag   had/em   dum1   dum2";

pub fn event_marker(number: usize, trigger: u32) -> String {
    format!("{:>3} {:>13} {:>8}", 0, number, trigger)
}

/// Object written as one LHCO line; `had/em` and the two dummy columns are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LhcoObject {
    pub type_code: i64,
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub mass: f64,
    pub ntrk: f64,
    pub btag: f64,
}

impl LhcoObject {
    pub fn jet(eta: f64, phi: f64, pt: f64, btagged: bool) -> Self {
        Self {
            type_code: type_code::JET,
            eta,
            phi,
            pt,
            mass: 0.0,
            ntrk: 4.0,
            btag: if btagged { 1.0 } else { 0.0 },
        }
    }

    pub fn met(phi: f64, et: f64) -> Self {
        Self {
            type_code: type_code::MET,
            eta: 0.0,
            phi,
            pt: et,
            mass: 0.0,
            ntrk: 0.0,
            btag: 0.0,
        }
    }

    pub fn to_line(&self, index: usize) -> String {
        format!(
            "{:>3} {:>4} {:>8.3} {:>8.3} {:>8.2} {:>8.2} {:>6.1} {:>6.1} {:>8.2} {:>6.1} {:>6.1}",
            index,
            self.type_code,
            self.eta,
            self.phi,
            self.pt,
            self.mass,
            self.ntrk,
            self.btag,
            0.0,
            0.0,
            0.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hhcore::lhco_interface::RawRecord;

    #[test]
    fn object_line_parses_back() {
        let line = LhcoObject::jet(-1.25, 2.5, 88.123, true).to_line(3);
        let record = RawRecord::parse(&line, 1).unwrap();
        assert_eq!(record.index, 3);
        assert_eq!(record.type_code, 4);
        assert_eq!(record.eta, -1.25);
        assert_eq!(record.pt, 88.12);
        assert!(record.is_btagged());
    }

    #[test]
    fn marker_starts_with_zero_token() {
        assert_eq!(event_marker(12, 0).split_whitespace().next(), Some("0"));
    }
}
