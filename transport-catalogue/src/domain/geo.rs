//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Tolerance for comparing coordinate components, in degrees.
pub const COORDINATE_EPSILON: f64 = 1e-6;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Equality is approximate: two coordinates are equal when both components
/// differ by less than [`COORDINATE_EPSILON`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        (self.lat - other.lat).abs() < COORDINATE_EPSILON
            && (self.lng - other.lng).abs() < COORDINATE_EPSILON
    }
}

/// Great-circle distance between two points in meters.
///
/// Uses the spherical law of cosines. Identical points are exactly `0.0`.
///
/// # Examples
///
/// ```
/// use transport_catalogue::domain::{Coordinates, compute_distance};
///
/// let a = Coordinates::new(55.611087, 37.208290);
/// assert_eq!(compute_distance(a, a), 0.0);
///
/// let b = Coordinates::new(55.595884, 37.209755);
/// let d = compute_distance(a, b);
/// assert!(d > 1600.0 && d < 1800.0);
/// ```
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let dr = std::f64::consts::PI / 180.0;
    let cos_angle = (from.lat * dr).sin() * (to.lat * dr).sin()
        + (from.lat * dr).cos() * (to.lat * dr).cos() * ((from.lng - to.lng).abs() * dr).cos();

    // Rounding can push the argument just outside acos's domain
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}
