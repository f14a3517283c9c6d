use std::iter::Sum;
use std::ops::{Add, Sub};

/// Failure raised by kinematic helpers instead of producing a NaN.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error("spacelike four-vector sum (m^2 = {mass_squared})")]
    NegativeRadicand { mass_squared: f64 },
}

/// Energy-momentum four-vector in GeV with cached transverse quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourVector {
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pt: f64,
    p_abs: f64,
    eta: f64,
    phi: f64,
}

impl FourVector {
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        let pt = (px * px + py * py).sqrt();
        let p_abs = (px * px + py * py + pz * pz).sqrt();
        let eta = 0.5 * ((p_abs + pz) / (p_abs - pz)).ln();
        let phi = py.atan2(px);
        Self {
            e,
            px,
            py,
            pz,
            pt,
            p_abs,
            eta,
            phi,
        }
    }

    /// Builds the four-vector of a detector object from `(pt, eta, phi, mass)`.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let e = (px * px + py * py + pz * pz + mass * mass).sqrt();
        Self::new(e, px, py, pz)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn pt(&self) -> f64 {
        self.pt
    }

    pub fn p_abs(&self) -> f64 {
        self.p_abs
    }

    /// Pseudorapidity. Infinite along the beam axis and NaN for a null momentum.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn mass_squared(&self) -> f64 {
        dot4(self, self)
    }

    pub fn mass(&self) -> Result<f64, KinematicsError> {
        let mass_squared = self.mass_squared();
        if mass_squared < 0.0 {
            return Err(KinematicsError::NegativeRadicand { mass_squared });
        }
        Ok(mass_squared.sqrt())
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(
            self.e + rhs.e,
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
        )
    }
}

impl Sub for FourVector {
    type Output = FourVector;

    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(
            self.e - rhs.e,
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
        )
    }
}

impl<'a> Sum<&'a FourVector> for FourVector {
    fn sum<I: Iterator<Item = &'a FourVector>>(iter: I) -> Self {
        iter.fold(FourVector::zero(), |acc, p| acc + *p)
    }
}

/// Minkowski product with (+, -, -, -) metric.
pub fn dot4(a: &FourVector, b: &FourVector) -> f64 {
    a.e * b.e - a.px * b.px - a.py * b.py - a.pz * b.pz
}

/// Invariant mass of the summed system.
pub fn invariant_mass(vectors: &[FourVector]) -> Result<f64, KinematicsError> {
    vectors.iter().sum::<FourVector>().mass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn massive_object_at_rest_in_transverse_plane() {
        let p = FourVector::from_pt_eta_phi_m(30.0, 0.0, 0.0, 40.0);
        assert!(close(p.e, 50.0));
        assert!(close(p.pt(), 30.0));
        assert!(close(p.eta(), 0.0));
        assert!(close(p.mass().unwrap(), 40.0));
    }

    #[test]
    fn detector_coordinates_are_recovered() {
        let p = FourVector::from_pt_eta_phi_m(55.0, -1.3, 2.1, 4.7);
        assert!(close(p.pt(), 55.0));
        assert!(close(p.eta(), -1.3));
        assert!(close(p.phi(), 2.1));
    }

    #[test]
    fn back_to_back_photons_give_twice_the_energy() {
        let a = FourVector::from_pt_eta_phi_m(62.5, 0.0, 0.0, 0.0);
        let b = FourVector::from_pt_eta_phi_m(62.5, 0.0, std::f64::consts::PI, 0.0);
        assert!(close(invariant_mass(&[a, b]).unwrap(), 125.0));
    }

    #[test]
    fn spacelike_sum_is_reported() {
        let p = FourVector::new(1.0, 3.0, 0.0, 0.0);
        let err = invariant_mass(&[p]).unwrap_err();
        assert_eq!(err, KinematicsError::NegativeRadicand { mass_squared: -8.0 });
    }

    #[test]
    fn empty_sum_is_massless() {
        assert_eq!(invariant_mass(&[]).unwrap(), 0.0);
    }

    fn physical() -> impl Strategy<Value = FourVector> {
        (1.0f64..500.0, -3.0f64..3.0, -3.1f64..3.1, 1.0f64..50.0)
            .prop_map(|(pt, eta, phi, m)| FourVector::from_pt_eta_phi_m(pt, eta, phi, m))
    }

    proptest! {
        #[test]
        fn addition_commutes(a in physical(), b in physical()) {
            let ab = a + b;
            let ba = b + a;
            prop_assert!(close(ab.e, ba.e));
            prop_assert!(close(ab.px, ba.px));
            prop_assert!(close(ab.py, ba.py));
            prop_assert!(close(ab.pz, ba.pz));
        }

        #[test]
        fn pair_mass_survives_subtracting_a_partner(a in physical(), b in physical()) {
            let recovered = (a + b) - a;
            let direct = invariant_mass(&[a, b]).unwrap();
            let rebuilt = invariant_mass(&[a, recovered]).unwrap();
            let e = (a + b).e;
            prop_assert!((direct * direct - rebuilt * rebuilt).abs() <= 1e-9 * e * e);
        }

        #[test]
        fn subtraction_undoes_addition(a in physical(), b in physical()) {
            let recovered = (a + b) - a;
            let scale = 1e-9 * (1.0 + a.e + b.e);
            prop_assert!((recovered.e - b.e).abs() < scale);
            prop_assert!((recovered.px - b.px).abs() < scale);
            prop_assert!((recovered.py - b.py).abs() < scale);
            prop_assert!((recovered.pz - b.pz).abs() < scale);
        }

        #[test]
        fn addition_associates(a in physical(), b in physical(), c in physical()) {
            let left = (a + b) + c;
            let right = a + (b + c);
            let scale = 1e-9 * (1.0 + left.e);
            prop_assert!((left.e - right.e).abs() < scale);
            prop_assert!((left.px - right.px).abs() < scale);
            prop_assert!((left.py - right.py).abs() < scale);
            prop_assert!((left.pz - right.pz).abs() < scale);
        }
    }
}
