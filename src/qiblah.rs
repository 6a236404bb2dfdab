//! Qiblah direction.
//!
//! Great-circle initial bearing from an observer to the Kaaba, measured
//! clockwise from true north.

use std::f64::consts::PI;

/// Kaaba latitude, degrees north.
pub const KAABA_LATITUDE: f64 = 21.422_49;

/// Kaaba longitude, degrees east.
pub const KAABA_LONGITUDE: f64 = 39.826_174;

/// Qiblah bearing for one location.
///
/// # Examples
///
/// ```
/// use mawarith::qiblah::Qiblah;
///
/// // Paris, France
/// let qiblah = Qiblah::new(2.3522, 48.8566);
/// assert!((qiblah.direction() - 119.16).abs() < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qiblah {
    degrees: f64,
}

impl Qiblah {
    /// Computes the bearing from (`longitude`, `latitude`), in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        let rad = PI / 180.0;
        let delta = (KAABA_LONGITUDE - longitude) * rad;
        let lat = latitude * rad;
        let kaaba_lat = KAABA_LATITUDE * rad;

        let num = delta.sin() * kaaba_lat.cos();
        let denom = lat.cos() * kaaba_lat.sin() - lat.sin() * kaaba_lat.cos() * delta.cos();
        let degrees = (num.atan2(denom) / rad).rem_euclid(360.0);

        Self { degrees }
    }

    /// Bearing in decimal degrees from true north, in `[0, 360)`.
    pub fn direction(&self) -> f64 {
        self.degrees
    }

    /// Bearing formatted as degrees, arc-minutes and arc-seconds.
    pub fn to_dms(&self) -> String {
        let degrees = self.degrees.floor();
        let minutes_full = (self.degrees - degrees) * 60.0;
        let minutes = minutes_full.floor();
        let seconds = ((minutes_full - minutes) * 60.0).floor();
        format!("{degrees}\u{b0} {minutes}' {seconds}''")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paris_bearing() {
        let q = Qiblah::new(2.3522, 48.8566);
        assert!((q.direction() - 119.16).abs() < 0.5, "got {}", q.direction());
    }

    #[test]
    fn test_jakarta_bearing() {
        let q = Qiblah::new(106.8456, -6.2088);
        assert!((q.direction() - 295.15).abs() < 0.5, "got {}", q.direction());
    }

    #[test]
    fn test_new_york_bearing() {
        let q = Qiblah::new(-74.0060, 40.7128);
        assert!((q.direction() - 58.48).abs() < 0.5, "got {}", q.direction());
    }

    #[test]
    fn test_due_north_of_kaaba_points_south() {
        let q = Qiblah::new(KAABA_LONGITUDE, KAABA_LATITUDE + 10.0);
        assert!((q.direction() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_range() {
        for &(lon, lat) in &[(0.0, 0.0), (170.0, 60.0), (-170.0, -60.0), (100.0, 45.0)] {
            let d = Qiblah::new(lon, lat).direction();
            assert!((0.0..360.0).contains(&d));
        }
    }

    #[test]
    fn test_dms_formatting() {
        let q = Qiblah::new(2.3522, 48.8566);
        let dms = q.to_dms();
        assert!(dms.contains('\u{b0}'));
        assert!(dms.ends_with("''"));
    }
}
