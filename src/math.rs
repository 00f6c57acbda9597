//! Angle arithmetic and nalgebra extensions for the Qibla Compass library

use nalgebra::Vector3;

/// Normalize an angle in degrees into the compass range `[0, 360)`.
///
/// # Example
/// ```
/// use qibla_compass::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// assert_eq!(normalize_degrees(725.0), 5.0);
/// ```
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        // The addition can round back up to exactly 360.0 for tiny negatives
        (wrapped + 360.0) % 360.0
    } else {
        wrapped
    }
}

/// Wrap an angle in degrees into the signed range `(-180, 180]`.
///
/// Used wherever the shortest arc between two headings matters, such as the
/// display rotation smoothing.
///
/// # Example
/// ```
/// use qibla_compass::wrap_degrees;
///
/// assert_eq!(wrap_degrees(270.0), -90.0);
/// assert_eq!(wrap_degrees(180.0), 180.0);
/// assert_eq!(wrap_degrees(-190.0), 170.0);
/// ```
pub fn wrap_degrees(degrees: f64) -> f64 {
    let normalized = normalize_degrees(degrees);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Extension trait for `Vector3` sensor samples
pub trait Vector3Ext {
    /// Whether every component is a finite number.
    ///
    /// Sensor drivers occasionally deliver NaN or infinite components during
    /// startup or bus glitches; callers use this to route such samples through
    /// the lenient degradation path.
    fn is_finite(&self) -> bool;
}

impl Vector3Ext for Vector3<f32> {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
