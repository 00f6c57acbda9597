//! Tilt-compensated orientation estimation from a single sensor sample pair

use nalgebra::Vector3;

use crate::math::{Vector3Ext, normalize_degrees};

/// Device attitude derived from one accelerometer+magnetometer sample pair.
///
/// All angles in degrees: `pitch` in `[-90, 90]`, `roll` in `(-180, 180]`,
/// `yaw` in `[0, 360)` with 0 = magnetic north. Recomputed from scratch every
/// tick; there is no temporal state to carry between estimates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationEstimate {
    /// Rotation about the body Y axis, degrees
    pub pitch: f64,
    /// Rotation about the body X axis, degrees
    pub roll: f64,
    /// Tilt-compensated magnetic heading, degrees
    pub yaw: f64,
}

impl OrientationEstimate {
    /// The estimate reported when a sample is unusable.
    pub const NEUTRAL: Self = Self {
        pitch: 0.0,
        roll: 0.0,
        yaw: 0.0,
    };
}

/// Estimate pitch, roll, and tilt-compensated magnetic heading from one
/// accelerometer+magnetometer pair.
///
/// The accelerometer is expected in g (gravity-normalized); only the direction
/// of the magnetometer vector matters, so any consistent unit works. Samples
/// with a NaN or infinite component yield [`OrientationEstimate::NEUTRAL`]
/// rather than an error: dropouts are routine at sensor rate and must never
/// interrupt the display loop.
///
/// The magnetometer is rotated into the horizontal plane using the
/// just-computed pitch and roll (roll compensated first, then pitch), and the
/// heading is `atan2` of the leveled field plus a fixed 180° offset. The
/// offset matches the body-frame convention of the reference hardware: a flat
/// device with the field along +Y reads 270°, along +X reads 180°. It is a
/// calibrated convention, not a derivation; keep it in sync with the arrow
/// artwork.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use qibla_compass::estimate_orientation;
///
/// // Device flat, magnetic field along the body Y axis
/// let estimate = estimate_orientation(
///     Vector3::new(0.0, 0.0, 1.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// );
/// assert!(estimate.pitch.abs() < 1e-9);
/// assert!(estimate.roll.abs() < 1e-9);
/// assert!((estimate.yaw - 270.0).abs() < 1e-9);
/// ```
pub fn estimate_orientation(
    accelerometer: Vector3<f32>,
    magnetometer: Vector3<f32>,
) -> OrientationEstimate {
    if !accelerometer.is_finite() || !magnetometer.is_finite() {
        log::debug!("rejecting non-finite sensor sample, holding neutral orientation");
        return OrientationEstimate::NEUTRAL;
    }

    let ax = f64::from(accelerometer.x);
    let ay = f64::from(accelerometer.y);
    let az = f64::from(accelerometer.z);
    let mx = f64::from(magnetometer.x);
    let my = f64::from(magnetometer.y);
    let mz = f64::from(magnetometer.z);

    // Clamp so readings a hair past 1 g saturate at the poles instead of NaN
    let pitch = (-ax).clamp(-1.0, 1.0).asin();
    let roll = ay.atan2(az);

    // Rotate the magnetometer into the horizontal plane: roll first, then pitch
    let (sin_roll, cos_roll) = roll.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    let by = my * cos_roll - mz * sin_roll;
    let leveled_z = my * sin_roll + mz * cos_roll;
    let bx = mx * cos_pitch + leveled_z * sin_pitch;

    // The 180 degree offset is the body-frame convention of the compass arrow
    let yaw = normalize_degrees(by.atan2(bx).to_degrees() + 180.0);

    OrientationEstimate {
        pitch: pitch.to_degrees(),
        roll: roll.to_degrees(),
        yaw,
    }
}
