pub mod angles;
pub mod fourvector;

pub use angles::{delta_eta, delta_phi, delta_r, wrap_angle};
pub use fourvector::{dot4, invariant_mass, FourVector, KinematicsError};
