//! Qibla direction service composing geodesy, declination, and orientation

use nalgebra::Vector3;

use crate::declination::{DeclinationModel, NullDeclination, declination_with, magnetic_to_true};
use crate::geodesy::{self, GeoCoordinate, InvalidCoordinate};
use crate::math::normalize_degrees;
use crate::orientation::{OrientationEstimate, estimate_orientation};

/// One complete compass reading for a sensor tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaReading {
    /// Device attitude for the tick
    pub orientation: OrientationEstimate,
    /// Tilt-compensated heading relative to magnetic north, degrees `[0, 360)`
    pub magnetic_heading: f64,
    /// Heading relative to true north after declination correction, degrees
    /// `[0, 360)`
    pub true_heading: f64,
    /// Great-circle bearing from the device to the Kaaba, degrees `[0, 360)`
    pub bearing: f64,
    /// Great-circle distance from the device to the Kaaba, meters
    pub distance: f64,
    /// Signed rotation for the arrow graphic, degrees `(-360, 0]`
    pub rotation: f64,
}

/// The compass service: computes the arrow rotation from a location and a
/// device heading.
///
/// Stateless apart from the declination model, which is itself stateless; one
/// instance can serve calls from any thread at any frequency. The default
/// model is [`NullDeclination`]; plug a real geomagnetic model in through
/// [`with_model`](Self::with_model) without changing anything downstream.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use qibla_compass::{GeoCoordinate, QiblaCompass};
///
/// let compass = QiblaCompass::new();
/// let location = GeoCoordinate::new(21.0, 39.0);
///
/// // Facing exactly along the bearing leaves the arrow at zero
/// let bearing = qibla_compass::bearing_to_kaaba(location).unwrap();
/// let rotation = compass.display_rotation(location, bearing).unwrap();
/// assert!(rotation.abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QiblaCompass<M = NullDeclination> {
    declination_model: M,
}

impl QiblaCompass<NullDeclination> {
    /// Create a compass with the shipped (null) declination model.
    pub fn new() -> Self {
        Self {
            declination_model: NullDeclination,
        }
    }
}

impl<M: DeclinationModel> QiblaCompass<M> {
    /// Create a compass with a custom declination model.
    pub fn with_model(declination_model: M) -> Self {
        Self { declination_model }
    }

    /// Signed rotation for the arrow graphic given the device location and a
    /// true heading in degrees.
    ///
    /// The raw delta `bearing - heading` is normalized into `[0, 360)` and
    /// then negated, because the arrow graphic rotates opposite to the
    /// heading delta; the result lies in `(-360, 0]`. This sign convention is
    /// part of the rendering contract and is preserved exactly; the shortest
    /// arc between consecutive values is the smoothing layer's concern.
    ///
    /// A non-finite heading is treated as 0 (the neutral estimate's yaw), so
    /// a degraded sensor path still yields a usable, NaN-free rotation.
    ///
    /// # Errors
    /// Returns [`InvalidCoordinate`] if the location has a non-finite
    /// component; the caller should show "location required" rather than an
    /// arrow.
    pub fn display_rotation(
        &self,
        location: GeoCoordinate,
        true_heading: f64,
    ) -> Result<f64, InvalidCoordinate> {
        let bearing = geodesy::bearing_to_kaaba(location)?;
        Ok(arrow_rotation(bearing, true_heading))
    }

    /// Run the full pipeline for one sensor tick: estimate orientation, correct
    /// the heading for declination, and compute bearing, distance, and arrow
    /// rotation.
    ///
    /// `decimal_year` feeds the declination model (e.g. `2026.6`); with the
    /// null model it is ignored. Sensor glitches degrade per the lenient
    /// policy of [`estimate_orientation`]; only a malformed location is an
    /// error.
    ///
    /// # Errors
    /// Returns [`InvalidCoordinate`] if the location has a non-finite
    /// component.
    pub fn read(
        &self,
        location: GeoCoordinate,
        accelerometer: Vector3<f32>,
        magnetometer: Vector3<f32>,
        decimal_year: f64,
    ) -> Result<QiblaReading, InvalidCoordinate> {
        let bearing = geodesy::bearing_to_kaaba(location)?;
        let distance = geodesy::distance_to_kaaba(location)?;

        let orientation = estimate_orientation(accelerometer, magnetometer);
        let declination = declination_with(&self.declination_model, location, decimal_year);
        let true_heading = magnetic_to_true(orientation.yaw, declination);

        Ok(QiblaReading {
            orientation,
            magnetic_heading: orientation.yaw,
            true_heading,
            bearing,
            distance,
            rotation: arrow_rotation(bearing, true_heading),
        })
    }
}

fn arrow_rotation(bearing: f64, true_heading: f64) -> f64 {
    let heading = if true_heading.is_finite() {
        true_heading
    } else {
        log::debug!("non-finite heading, rotating relative to neutral heading");
        0.0
    };
    -normalize_degrees(bearing - heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::bearing_to_kaaba;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_rotation_sign_convention() {
        let compass = QiblaCompass::new();
        let location = GeoCoordinate::new(21.0, 39.0);
        // Bearing fixture for this origin
        let bearing = 61.10542203910711;

        let facing_north = compass.display_rotation(location, 0.0).unwrap();
        assert!((facing_north + bearing).abs() < EPSILON, "got {}", facing_north);

        let past_target = compass.display_rotation(location, 100.0).unwrap();
        assert!((past_target + 321.1054220391071).abs() < 1e-9, "got {}", past_target);
    }

    #[test]
    fn test_rotation_range() {
        let compass = QiblaCompass::new();
        let location = GeoCoordinate::new(-6.2088, 106.8456);
        for heading in [0.0, 45.0, 90.0, 180.0, 270.0, 359.9] {
            let rotation = compass.display_rotation(location, heading).unwrap();
            assert!(
                rotation > -360.0 && rotation <= 0.0,
                "rotation {} out of range for heading {}",
                rotation,
                heading
            );
        }
    }

    #[test]
    fn test_zero_rotation_when_facing_target() {
        let compass = QiblaCompass::new();
        let location = GeoCoordinate::new(51.5074, -0.1278);
        let bearing = bearing_to_kaaba(location).unwrap();
        let rotation = compass.display_rotation(location, bearing).unwrap();
        assert!(rotation.abs() < EPSILON);
    }

    #[test]
    fn test_invalid_location_is_reported() {
        let compass = QiblaCompass::new();
        assert!(
            compass
                .display_rotation(GeoCoordinate::new(f64::NAN, 0.0), 90.0)
                .is_err()
        );
        assert!(
            compass
                .read(
                    GeoCoordinate::new(0.0, f64::INFINITY),
                    Vector3::new(0.0, 0.0, 1.0),
                    Vector3::new(0.0, 1.0, 0.0),
                    2026.6,
                )
                .is_err()
        );
    }

    #[test]
    fn test_non_finite_heading_degrades() {
        let compass = QiblaCompass::new();
        let location = GeoCoordinate::new(21.0, 39.0);
        let rotation = compass.display_rotation(location, f64::NAN).unwrap();
        let neutral = compass.display_rotation(location, 0.0).unwrap();
        assert_eq!(rotation, neutral);
    }

    #[test]
    fn test_read_composes_pipeline() {
        let compass = QiblaCompass::new();
        let location = GeoCoordinate::new(21.0, 39.0);
        let reading = compass
            .read(
                location,
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 1.0, 0.0),
                2026.6,
            )
            .unwrap();

        // Flat device, field along +Y: magnetic heading 270, null declination
        assert!((reading.magnetic_heading - 270.0).abs() < EPSILON);
        assert_eq!(reading.magnetic_heading, reading.true_heading);
        assert!((reading.bearing - 61.10542203910711).abs() < EPSILON);
        assert!((reading.rotation + normalize_degrees(reading.bearing - 270.0)).abs() < EPSILON);
        assert!(reading.distance > 0.0);
    }

    #[test]
    fn test_custom_declination_model_shifts_heading() {
        struct Fixed(f64);
        impl DeclinationModel for Fixed {
            fn declination(&self, _at: GeoCoordinate, _decimal_year: f64) -> f64 {
                self.0
            }
        }

        let location = GeoCoordinate::new(51.5074, -0.1278);
        let accel = Vector3::new(0.0, 0.0, 1.0);
        let mag = Vector3::new(1.0, 0.0, 0.0); // magnetic heading 180

        let null = QiblaCompass::new()
            .read(location, accel, mag, 2026.6)
            .unwrap();
        let shifted = QiblaCompass::with_model(Fixed(10.0))
            .read(location, accel, mag, 2026.6)
            .unwrap();

        assert_eq!(null.magnetic_heading, shifted.magnetic_heading);
        assert!((shifted.true_heading - (null.true_heading + 10.0)).abs() < EPSILON);
    }
}
