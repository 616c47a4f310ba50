use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use thiserror::Error;

use crate::geodesic::GeoPoint;
use crate::spacial::Position;

/// The projection collaborator could not convert the given coordinate pair.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("projection failed for coordinate ({x}, {y})")]
pub struct ProjectionError {
    pub x: f64,
    pub y: f64,
}

/// Conversion between the map's working projection and geographic coordinates.
///
/// Normally implemented by the map collaborator; [`WebMercator`] covers the common
/// spherical-mercator case. Failures are surfaced immediately, never retried.
pub trait Projector {
    fn project(&self, geographic: GeoPoint) -> Result<Position, ProjectionError>;
    fn unproject(&self, projected: Position) -> Result<GeoPoint, ProjectionError>;
}

/// Semi-major axis of the spherical mercator earth model, in meters.
const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Spherical web-mercator (EPSG:3857), the working projection of the usual slippy-map widgets.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebMercator;

impl Projector for WebMercator {
    fn project(&self, geographic: GeoPoint) -> Result<Position, ProjectionError> {
        let x = MERCATOR_RADIUS * geographic.longitude.to_radians();
        let y = MERCATOR_RADIUS * (FRAC_PI_4 + geographic.latitude.to_radians() / 2.0).tan().ln();

        // the poles map to infinity
        if x.is_finite() && y.is_finite() {
            Ok(Position::new(x, y))
        } else {
            Err(ProjectionError {
                x: geographic.longitude,
                y: geographic.latitude,
            })
        }
    }

    fn unproject(&self, projected: Position) -> Result<GeoPoint, ProjectionError> {
        let longitude = (projected.x / MERCATOR_RADIUS).to_degrees();
        let latitude = (2.0 * (projected.y / MERCATOR_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();

        if longitude.is_finite() && latitude.is_finite() {
            Ok(GeoPoint::new(longitude, latitude))
        } else {
            Err(ProjectionError {
                x: projected.x,
                y: projected.y,
            })
        }
    }
}
