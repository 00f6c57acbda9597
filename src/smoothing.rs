//! Display rotation smoothing for the compass arrow

use crate::math::wrap_degrees;

/// Default low-pass cutoff in Hz, tuned for an arrow that settles without lag.
const DEFAULT_CUTOFF_FREQUENCY: f64 = 2.0;
/// Typical orientation tick rate in Hz.
const DEFAULT_SAMPLE_RATE: f64 = 50.0;

/// Low-pass filter for the arrow rotation.
///
/// The orientation estimator recomputes from scratch every tick; temporal
/// smoothing lives here, on the caller's side of the seam, owned by whatever
/// drives the animation. Feed it the display rotation once per tick and
/// render the returned value.
///
/// The filter follows the shortest arc between the current and target angle,
/// so a heading flicker across the 0/360 seam nudges the arrow a few degrees
/// instead of spinning it the long way around.
///
/// # Example
/// ```
/// use qibla_compass::RotationSmoother;
///
/// let mut smoother = RotationSmoother::new(2.0, 50.0);
///
/// // First update snaps so the arrow starts where the target is
/// assert_eq!(smoother.update(-120.0), -120.0);
///
/// // Later updates converge toward a moved target
/// let next = smoother.update(-100.0);
/// assert!(next > -120.0 && next < -100.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RotationSmoother {
    /// Per-update fraction of the remaining arc
    filter_coefficient: f64,
    /// Current smoothed rotation in degrees
    rotation: f64,
    /// Whether the filter has seen a target yet
    primed: bool,
}

impl RotationSmoother {
    /// Create a smoother for the given cutoff frequency and sample rate, both
    /// in Hz.
    ///
    /// The coefficient is `2π × fc / fs`, capped at 1 so a slow tick rate
    /// tracks the target directly instead of overshooting.
    pub fn new(cutoff_frequency: f64, sample_rate: f64) -> Self {
        let filter_coefficient =
            (2.0 * core::f64::consts::PI * cutoff_frequency / sample_rate).clamp(0.0, 1.0);
        Self {
            filter_coefficient,
            rotation: 0.0,
            primed: false,
        }
    }

    /// Advance the filter toward `target` degrees and return the smoothed
    /// rotation.
    ///
    /// The first call after construction or [`reset`](Self::reset) snaps to
    /// the target. A non-finite target leaves the state untouched and returns
    /// the current rotation, so sensor glitches upstream cannot put NaN into
    /// a render transform.
    pub fn update(&mut self, target: f64) -> f64 {
        if !target.is_finite() {
            log::debug!("ignoring non-finite smoothing target");
            return self.rotation;
        }
        if !self.primed {
            self.primed = true;
            self.rotation = target;
            return self.rotation;
        }

        let delta = wrap_degrees(target - self.rotation);
        self.rotation += delta * self.filter_coefficient;
        self.rotation
    }

    /// Current smoothed rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Filter coefficient derived from the constructor parameters.
    pub fn filter_coefficient(&self) -> f64 {
        self.filter_coefficient
    }

    /// Forget all state; the next update snaps to its target.
    pub fn reset(&mut self) {
        self.rotation = 0.0;
        self.primed = false;
    }
}

impl Default for RotationSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF_FREQUENCY, DEFAULT_SAMPLE_RATE)
    }
}
