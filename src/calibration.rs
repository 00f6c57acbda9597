//! Magnetometer calibration applied before orientation estimation

use nalgebra::{Matrix3, Vector3};

/// Hard and soft iron correction for magnetometer readings.
///
/// Nearby ferrous material and board-level interference bias the magnetometer;
/// a calibration fit (done by the host application, typically a figure-eight
/// gesture) produces a hard iron offset and a soft iron matrix. Applying them
/// to each raw sample before [`estimate_orientation`] keeps the heading honest.
///
/// The default is a pass-through (identity matrix, zero offset) so an
/// uncalibrated device still works, just less accurately.
///
/// [`estimate_orientation`]: crate::estimate_orientation
///
/// # Example
/// ```
/// use nalgebra::{Matrix3, Vector3};
/// use qibla_compass::MagneticCalibration;
///
/// let calibration = MagneticCalibration::new(
///     Matrix3::identity(),
///     Vector3::new(12.0, -3.5, 8.0),
/// );
/// let corrected = calibration.apply(Vector3::new(30.0, 4.0, -20.0));
/// assert_eq!(corrected, Vector3::new(18.0, 7.5, -28.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticCalibration {
    /// 3x3 soft iron correction matrix
    pub soft_iron: Matrix3<f32>,
    /// Hard iron offset vector, same unit as the raw readings
    pub hard_iron: Vector3<f32>,
}

impl MagneticCalibration {
    /// Create a calibration from a fitted soft iron matrix and hard iron
    /// offset.
    pub fn new(soft_iron: Matrix3<f32>, hard_iron: Vector3<f32>) -> Self {
        Self {
            soft_iron,
            hard_iron,
        }
    }

    /// Apply the correction: `soft_iron * (raw - hard_iron)`.
    pub fn apply(&self, raw: Vector3<f32>) -> Vector3<f32> {
        self.soft_iron * (raw - self.hard_iron)
    }
}

impl Default for MagneticCalibration {
    fn default() -> Self {
        Self {
            soft_iron: Matrix3::identity(),
            hard_iron: Vector3::zeros(),
        }
    }
}
