//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in metres.
    ///
    /// Uses the spherical law of cosines. Identical points short-circuit to
    /// zero, since rounding can push the `acos` argument just above 1.0.
    ///
    /// ```
    /// use transport_catalogue::domain::Coordinates;
    ///
    /// let a = Coordinates::new(55.611087, 37.20829);
    /// assert_eq!(a.distance_to(&a), 0.0);
    /// ```
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        if self == other {
            return 0.0;
        }
        let dr = std::f64::consts::PI / 180.0;
        let cos_angle = (self.latitude * dr).sin() * (other.latitude * dr).sin()
            + (self.latitude * dr).cos()
                * (other.latitude * dr).cos()
                * ((self.longitude - other.longitude).abs() * dr).cos();
        cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        let pole = Coordinates::new(90.0, 180.0);
        assert_eq!(pole.distance_to(&pole), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((a.distance_to(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn known_moscow_pair() {
        let tolstopaltsevo = Coordinates::new(55.611087, 37.20829);
        let marushkino = Coordinates::new(55.595884, 37.209755);
        let d = tolstopaltsevo.distance_to(&marushkino);
        assert!((d - 1693.0).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodes() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        let half_circumference = EARTH_RADIUS_M * std::f64::consts::PI;
        assert!((a.distance_to(&b) - half_circumference).abs() < 1e-3);
    }
}
