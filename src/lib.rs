#![no_std]

//! [![github]](https://github.com/wboayue/qibla-compass)&ensp;[![crates-io]](https://crates.io/crates/qibla-compass)&ensp;[![license]](https://opensource.org/licenses/MIT)
//!
//! [github]: https://img.shields.io/badge/github-8da0cb?style=for-the-badge&labelColor=555555&logo=github
//! [crates-io]: https://img.shields.io/badge/crates.io-fc8d62?style=for-the-badge&labelColor=555555&logo=rust
//! [license]: https://img.shields.io/badge/License-MIT-blue.svg?style=for-the-badge&labelColor=555555
//!
//! Qibla Compass - orientation and bearing engine for a Qibla-direction compass
//!
//! This library turns raw accelerometer/magnetometer samples and a GPS fix into
//! the rotation of a compass arrow pointing at the Kaaba. It computes a
//! tilt-compensated device heading from a single sensor sample pair, corrects
//! it from magnetic to true north, derives the great-circle bearing from the
//! device location to the fixed target, and combines the two into a signed
//! display rotation.
//!
//! The crate is pure math: no sensor drivers, no I/O, no rendering. The host
//! application owns sensor subscriptions and animation and calls in once per
//! sensor tick.
//!
//! # Features
//!
//! - Great-circle initial bearing and haversine distance to the Kaaba
//! - Tilt-compensated compass heading from one accelerometer+magnetometer pair
//! - Pluggable magnetic declination model (ships with a null model)
//! - Hard/soft iron magnetometer calibration
//! - Shortest-arc low-pass smoothing for the arrow animation
//! - `#![no_std]` compatible for embedded hosts
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use qibla_compass::{GeoCoordinate, QiblaCompass};
//!
//! let compass = QiblaCompass::new();
//! let location = GeoCoordinate::new(51.5074, -0.1278); // London
//!
//! // One sensor tick: device held flat, magnetic field along the body Y axis
//! let accelerometer = Vector3::new(0.0, 0.0, 1.0); // g
//! let magnetometer = Vector3::new(0.0, 1.0, 0.0);  // any consistent unit
//!
//! let reading = compass.read(location, accelerometer, magnetometer, 2026.6).unwrap();
//!
//! // Hand `reading.rotation` to the animation layer
//! assert!((0.0..360.0).contains(&reading.bearing));
//! assert!(reading.rotation.is_finite());
//! ```
//!
//! # Error policy
//!
//! Geographic input is strict: a non-finite coordinate fails with
//! [`InvalidCoordinate`] so the host can show "location unavailable" instead of
//! pointing the wrong way. Sensor input is lenient: glitched samples degrade to
//! neutral values and are reported through the [`log`] facade at debug level,
//! never as errors, so a noisy sensor cannot stall the display loop.
//!
//! For more documentation and examples, see: <https://github.com/wboayue/qibla-compass>

pub mod calibration;
pub mod declination;
pub mod geodesy;
mod math;
pub mod orientation;
mod qibla;
pub mod smoothing;

// Re-export all public types and functions
pub use calibration::MagneticCalibration;
pub use declination::{DeclinationModel, NullDeclination, magnetic_declination, magnetic_to_true};
pub use geodesy::{
    GeoCoordinate, InvalidCoordinate, KAABA, bearing_to_kaaba, distance_to_kaaba,
    haversine_distance, initial_bearing,
};
pub use math::{Vector3Ext, normalize_degrees, wrap_degrees};
pub use orientation::{OrientationEstimate, estimate_orientation};
pub use qibla::{QiblaCompass, QiblaReading};
pub use smoothing::RotationSmoother;
