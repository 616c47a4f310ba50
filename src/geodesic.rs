/// Mean Earth radius used by the haversine approximation, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic coordinate in degrees, longitude first to match the usual lon/lat pair ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Great-circle distance between two geographic coordinates in meters, via the haversine formula.
///
/// Out-of-range inputs are not validated; whatever the formula yields (including NaN) is
/// returned to the caller unchanged.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// One degree of latitude along a meridian on the R = 6371km sphere.
    const ONE_DEGREE_MERIDIAN_METERS: f64 = 111_194.92664455873;

    #[rstest]
    #[case(GeoPoint::new(0.0, 0.0))]
    #[case(GeoPoint::new(77.1025, 28.7041))]
    #[case(GeoPoint::new(-180.0, -90.0))]
    fn test_zero_distance_for_identical_points(#[case] point: GeoPoint) {
        assert_eq!(haversine_distance(point, point), 0.0);
    }

    #[rstest]
    #[case(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0))]
    #[case(GeoPoint::new(77.1025, 28.7041), GeoPoint::new(77.5, 28.0))]
    #[case(GeoPoint::new(-179.5, 10.0), GeoPoint::new(179.5, 10.0))]
    fn test_symmetry(#[case] a: GeoPoint, #[case] b: GeoPoint) {
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }

    #[test]
    fn test_known_value_one_degree_of_latitude() {
        let distance = haversine_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));

        assert!(
            (distance - ONE_DEGREE_MERIDIAN_METERS).abs() < 1.0,
            "expected ~111195m, got {}",
            distance
        );
    }

    #[test]
    fn test_nan_input_propagates() {
        let distance = haversine_distance(GeoPoint::new(0.0, f64::NAN), GeoPoint::new(0.0, 1.0));

        assert!(distance.is_nan());
    }
}
