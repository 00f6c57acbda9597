//! Great-circle bearing and distance on a spherical Earth model

use thiserror::Error;

use crate::math::normalize_degrees;

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Geographic position of the Kaaba in Mecca, the fixed target of the compass.
pub const KAABA: GeoCoordinate = GeoCoordinate {
    latitude: 21.422487,
    longitude: 39.826206,
};

/// A geographic point in degrees.
///
/// Latitude is degrees north in `[-90, 90]`, longitude degrees east in
/// `[-180, 180]`. The struct stores whatever it is given; the consuming
/// functions reject non-finite components rather than the constructor, so a
/// coordinate fresh off a GPS fix can be passed through without ceremony.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    /// Degrees north of the equator
    pub latitude: f64,
    /// Degrees east of the prime meridian
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A coordinate with a NaN or infinite component was passed to a geodesic
/// function.
///
/// This is a reported error rather than a silently-returned default: a wrong
/// bearing would point the user the wrong way, so the caller must surface
/// "location unavailable" instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("coordinate ({latitude}, {longitude}) is not finite")]
pub struct InvalidCoordinate {
    /// The offending latitude
    pub latitude: f64,
    /// The offending longitude
    pub longitude: f64,
}

fn check_finite(coordinate: GeoCoordinate) -> Result<(), InvalidCoordinate> {
    if coordinate.is_finite() {
        Ok(())
    } else {
        Err(InvalidCoordinate {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

/// Calculate the initial great-circle bearing from `origin` to `destination`.
///
/// Uses the standard spherical initial-bearing formula. The result is the
/// forward azimuth in degrees, `0` = north, `90` = east, in `[0, 360)`.
///
/// When origin and destination coincide the bearing is mathematically
/// undefined; this function returns `0.0` for that case.
///
/// # Errors
/// Returns [`InvalidCoordinate`] if any of the four components is NaN or
/// infinite.
///
/// # Example
/// ```
/// use qibla_compass::{GeoCoordinate, initial_bearing};
///
/// // Due east along the equator
/// let bearing = initial_bearing(
///     GeoCoordinate::new(0.0, 0.0),
///     GeoCoordinate::new(0.0, 90.0),
/// ).unwrap();
/// assert!((bearing - 90.0).abs() < 1e-9);
/// ```
pub fn initial_bearing(
    origin: GeoCoordinate,
    destination: GeoCoordinate,
) -> Result<f64, InvalidCoordinate> {
    check_finite(origin)?;
    check_finite(destination)?;

    let phi1 = origin.latitude.to_radians();
    let phi2 = destination.latitude.to_radians();
    let delta_lambda = (destination.longitude - origin.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    // atan2(0, 0) = 0 covers the degenerate origin == destination case
    Ok(normalize_degrees(y.atan2(x).to_degrees()))
}

/// Calculate the initial bearing from `origin` to the Kaaba.
///
/// # Errors
/// Returns [`InvalidCoordinate`] if `origin` has a non-finite component.
///
/// # Example
/// ```
/// use qibla_compass::{GeoCoordinate, bearing_to_kaaba};
///
/// let bearing = bearing_to_kaaba(GeoCoordinate::new(21.0, 39.0)).unwrap();
/// assert!((bearing - 61.1054).abs() < 1e-3);
/// ```
pub fn bearing_to_kaaba(origin: GeoCoordinate) -> Result<f64, InvalidCoordinate> {
    initial_bearing(origin, KAABA)
}

/// Calculate the great-circle distance in meters between two coordinates.
///
/// Haversine formula on a sphere of radius 6 371 000 m. Accurate to a few
/// kilometers over intercontinental distances, which is ample for showing
/// "distance to Mecca" alongside the compass.
///
/// # Errors
/// Returns [`InvalidCoordinate`] if any component is NaN or infinite; the
/// finiteness contract matches [`initial_bearing`].
pub fn haversine_distance(
    origin: GeoCoordinate,
    destination: GeoCoordinate,
) -> Result<f64, InvalidCoordinate> {
    check_finite(origin)?;
    check_finite(destination)?;

    let phi1 = origin.latitude.to_radians();
    let phi2 = destination.latitude.to_radians();
    let delta_phi = (destination.latitude - origin.latitude).to_radians();
    let delta_lambda = (destination.longitude - origin.longitude).to_radians();

    let sin_phi = (delta_phi / 2.0).sin();
    let sin_lambda = (delta_lambda / 2.0).sin();

    let a = sin_phi * sin_phi + phi1.cos() * phi2.cos() * sin_lambda * sin_lambda;
    // Rounding can push `a` a hair past 1 for near-antipodal pairs
    let a = a.clamp(0.0, 1.0);

    Ok(2.0 * EARTH_RADIUS_METERS * a.sqrt().asin())
}

/// Calculate the great-circle distance in meters from `origin` to the Kaaba.
///
/// # Errors
/// Returns [`InvalidCoordinate`] if `origin` has a non-finite component.
pub fn distance_to_kaaba(origin: GeoCoordinate) -> Result<f64, InvalidCoordinate> {
    haversine_distance(origin, KAABA)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoCoordinate::new(0.0, 0.0);

        let east = initial_bearing(origin, GeoCoordinate::new(0.0, 90.0)).unwrap();
        assert!((east - 90.0).abs() < EPSILON, "east bearing {}", east);

        let north = initial_bearing(origin, GeoCoordinate::new(1.0, 0.0)).unwrap();
        assert!(north.abs() < EPSILON, "north bearing {}", north);

        let south = initial_bearing(origin, GeoCoordinate::new(-1.0, 0.0)).unwrap();
        assert!((south - 180.0).abs() < EPSILON, "south bearing {}", south);

        let west = initial_bearing(origin, GeoCoordinate::new(0.0, -90.0)).unwrap();
        assert!((west - 270.0).abs() < EPSILON, "west bearing {}", west);
    }

    #[test]
    fn test_bearing_degenerate_same_point() {
        let p = GeoCoordinate::new(21.422487, 39.826206);
        assert_eq!(initial_bearing(p, p).unwrap(), 0.0);
    }

    #[test]
    fn test_bearing_to_kaaba_fixtures() {
        // Regression fixtures computed from the spherical formula
        let near = bearing_to_kaaba(GeoCoordinate::new(21.0, 39.0)).unwrap();
        assert!((near - 61.10542203910711).abs() < EPSILON, "got {}", near);

        let london = bearing_to_kaaba(GeoCoordinate::new(51.5074, -0.1278)).unwrap();
        assert!((london - 118.98722399197209).abs() < EPSILON, "got {}", london);

        let jakarta = bearing_to_kaaba(GeoCoordinate::new(-6.2088, 106.8456)).unwrap();
        assert!((jakarta - 295.15172450019486).abs() < EPSILON, "got {}", jakarta);
    }

    #[test]
    fn test_bearing_range() {
        let origins = [
            GeoCoordinate::new(89.0, 0.0),
            GeoCoordinate::new(-89.0, 170.0),
            GeoCoordinate::new(45.0, -120.0),
            GeoCoordinate::new(-33.9, 18.4),
            GeoCoordinate::new(0.0, 179.9),
        ];
        for origin in origins {
            let bearing = bearing_to_kaaba(origin).unwrap();
            assert!(
                (0.0..360.0).contains(&bearing),
                "bearing {} out of range for origin {:?}",
                bearing,
                origin
            );
        }
    }

    #[test]
    fn test_bearing_rejects_non_finite() {
        let kaaba = KAABA;
        let bad = [
            GeoCoordinate::new(f64::NAN, 0.0),
            GeoCoordinate::new(0.0, f64::INFINITY),
            GeoCoordinate::new(f64::NEG_INFINITY, f64::NAN),
        ];
        for origin in bad {
            assert!(initial_bearing(origin, kaaba).is_err());
            assert!(initial_bearing(kaaba, origin).is_err());
        }
        let err = initial_bearing(GeoCoordinate::new(f64::NAN, 7.0), kaaba).unwrap_err();
        assert!(err.latitude.is_nan());
        assert_eq!(err.longitude, 7.0);
    }

    #[test]
    fn test_distance_zero_and_symmetry() {
        let p = GeoCoordinate::new(0.0, 0.0);
        assert_eq!(haversine_distance(p, p).unwrap(), 0.0);

        let pairs = [
            (GeoCoordinate::new(51.5074, -0.1278), KAABA),
            (GeoCoordinate::new(-6.2088, 106.8456), GeoCoordinate::new(40.7128, -74.006)),
            (GeoCoordinate::new(89.9, 10.0), GeoCoordinate::new(-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            let ab = haversine_distance(a, b).unwrap();
            let ba = haversine_distance(b, a).unwrap();
            assert!((ab - ba).abs() < 1e-6, "asymmetric: {} vs {}", ab, ba);
        }
    }

    #[test]
    fn test_distance_fixtures() {
        let quarter = haversine_distance(
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 90.0),
        )
        .unwrap();
        assert!((quarter - 10_007_543.398010284).abs() < 1e-3, "got {}", quarter);

        let one_degree = haversine_distance(
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(1.0, 0.0),
        )
        .unwrap();
        assert!((one_degree - 111_194.92664455874).abs() < 1e-6, "got {}", one_degree);

        let to_kaaba = distance_to_kaaba(GeoCoordinate::new(0.0, 0.0)).unwrap();
        assert!((to_kaaba - 4_932_869.538062774).abs() < 1e-3, "got {}", to_kaaba);
    }

    #[test]
    fn test_distance_rejects_non_finite() {
        assert!(distance_to_kaaba(GeoCoordinate::new(0.0, f64::NAN)).is_err());
        assert!(
            haversine_distance(KAABA, GeoCoordinate::new(f64::INFINITY, 0.0)).is_err()
        );
    }

    #[test]
    fn test_bearing_is_deterministic() {
        let origin = GeoCoordinate::new(48.8566, 2.3522);
        let first = bearing_to_kaaba(origin).unwrap();
        let second = bearing_to_kaaba(origin).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
