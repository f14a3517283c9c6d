use std::f64::consts::PI;

/// Brings an angle back into `[-pi, pi]` with at most one `2*pi` correction.
///
/// Inputs further than `2*pi` outside the interval stay out of range.
pub fn wrap_angle(angle: f64) -> f64 {
    if angle > PI {
        angle - 2.0 * PI
    } else if angle < -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}

pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    wrap_angle(phi1 - phi2)
}

pub fn delta_eta(eta1: f64, eta2: f64) -> f64 {
    eta1 - eta2
}

pub fn delta_r(eta1: f64, phi1: f64, eta2: f64, phi2: f64) -> f64 {
    let deta = delta_eta(eta1, eta2);
    let dphi = delta_phi(phi1, phi2);
    (deta * deta + dphi * dphi).sqrt()
}
