//! Magnetic-to-true heading correction

use crate::geodesy::GeoCoordinate;
use crate::math::normalize_degrees;

/// Source of magnetic declination values.
///
/// Declination is the angle between magnetic north and true north at a given
/// place and time. This trait is the extension point for a real geomagnetic
/// model (e.g. a World Magnetic Model table); the library itself only ships
/// [`NullDeclination`]. Substituting a model changes the numbers, never the
/// contract: implementations must return finite degrees, roughly in
/// `[-180, 180]`.
///
/// # Example
/// ```
/// use qibla_compass::{DeclinationModel, GeoCoordinate, QiblaCompass};
///
/// /// A fixed offset measured on site.
/// struct Surveyed(f64);
///
/// impl DeclinationModel for Surveyed {
///     fn declination(&self, _at: GeoCoordinate, _decimal_year: f64) -> f64 {
///         self.0
///     }
/// }
///
/// let compass = QiblaCompass::with_model(Surveyed(4.5));
/// ```
pub trait DeclinationModel {
    /// Declination in degrees at `at` for the given decimal year
    /// (e.g. `2026.6` for mid-August 2026).
    fn declination(&self, at: GeoCoordinate, decimal_year: f64) -> f64;
}

/// Placeholder declination model returning 0 everywhere.
///
/// With zero declination the magnetic heading is used as the true heading
/// unchanged. This is deliberate reference behavior: a real geomagnetic model
/// needs coefficient tables that do not belong in this core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullDeclination;

impl DeclinationModel for NullDeclination {
    fn declination(&self, _at: GeoCoordinate, _decimal_year: f64) -> f64 {
        0.0
    }
}

/// Magnetic declination at a location from the shipped model (currently
/// constant 0).
///
/// Declination is advisory rather than safety-critical, so this is the one
/// lenient geographic function: a non-finite coordinate or year yields `0.0`
/// instead of an error.
pub fn magnetic_declination(at: GeoCoordinate, decimal_year: f64) -> f64 {
    declination_with(&NullDeclination, at, decimal_year)
}

/// Look up declination through `model`, guarding the lenient-tier contract on
/// its behalf.
pub(crate) fn declination_with<M: DeclinationModel>(
    model: &M,
    at: GeoCoordinate,
    decimal_year: f64,
) -> f64 {
    if !at.is_finite() || !decimal_year.is_finite() {
        log::debug!("non-finite declination input, assuming 0");
        return 0.0;
    }
    let declination = model.declination(at, decimal_year);
    if declination.is_finite() {
        declination
    } else {
        log::debug!("declination model returned a non-finite value, assuming 0");
        0.0
    }
}

/// Convert a magnetic heading to a true heading.
///
/// `(magnetic_heading + declination + 360) mod 360`, normalized into
/// `[0, 360)`. If either argument is non-finite the input heading is returned
/// unchanged, so a failed declination lookup degrades to a magnetic compass
/// rather than poisoning the display with NaN.
///
/// # Example
/// ```
/// use qibla_compass::magnetic_to_true;
///
/// assert_eq!(magnetic_to_true(350.0, 12.0), 2.0);
/// assert_eq!(magnetic_to_true(90.0, 0.0), 90.0);
/// assert_eq!(magnetic_to_true(90.0, f64::NAN), 90.0);
/// ```
pub fn magnetic_to_true(magnetic_heading: f64, declination: f64) -> f64 {
    if !magnetic_heading.is_finite() || !declination.is_finite() {
        log::debug!("non-finite heading correction input, keeping magnetic heading");
        return magnetic_heading;
    }
    normalize_degrees(magnetic_heading + declination)
}
