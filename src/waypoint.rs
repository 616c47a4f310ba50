use log::debug;

use crate::geodesic::{haversine_distance, GeoPoint};
use crate::projection::{ProjectionError, Projector};
use crate::spacial::Position;
use crate::DrawKind;

/// One vertex of a drawn path or ring, annotated with its geographic position and the
/// running distance from the start of the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Zero-based position in the owning list.
    pub index: usize,
    pub coordinate: GeoPoint,
    /// Distance along the geometry from waypoint 0 up to and including this waypoint.
    /// Rounded to 2 decimals for publication; always 0.0 at index 0.
    pub cumulative_distance_meters: f64,
}

impl Waypoint {
    /// Display label, e.g. `WP(03)`.
    pub fn label(&self) -> String {
        format!("WP({:02})", self.index)
    }
}

/// The published artifact of a completed drawing session.
///
/// Replaced wholesale on every publish; distances are never patched in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointList {
    kind: DrawKind,
    waypoints: Vec<Waypoint>,
}

impl WaypointList {
    /// The kind of geometry the list was derived from.
    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }
}

/// Raw projected vertices as delivered by the drawing surface on geometry completion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawGeometry {
    /// An open path, vertices in drawing order.
    Path(Vec<Position>),
    /// A closed polygon as one or more rings, ring-closed. The first ring is the outer
    /// boundary; any further rings are holes.
    Rings(Vec<Vec<Position>>),
}

impl RawGeometry {
    /// The vertex run that waypoints are derived from: the whole path, or the outer ring only.
    pub fn primary_vertices(&self) -> &[Position] {
        match self {
            RawGeometry::Path(vertices) => vertices,
            RawGeometry::Rings(rings) => rings
                .first()
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }
}

/// Projects each vertex to a geographic coordinate and accumulates great-circle distance
/// between consecutive vertices.
///
/// Accumulation runs at full precision; only the published per-waypoint figure is rounded,
/// so rounding error does not compound along the path. An empty vertex run yields an empty
/// list. Duplicate consecutive vertices yield zero-length segments, not errors.
#[profiling::function]
pub fn derive_waypoints(
    vertices: &[Position],
    kind: DrawKind,
    projector: &impl Projector,
) -> Result<WaypointList, ProjectionError> {
    let mut waypoints = Vec::with_capacity(vertices.len());
    let mut total = 0.0;
    let mut previous: Option<GeoPoint> = None;

    for (index, vertex) in vertices.iter().enumerate() {
        let coordinate = projector.unproject(*vertex)?;
        if let Some(previous) = previous {
            total += haversine_distance(previous, coordinate);
        }
        waypoints.push(Waypoint {
            index,
            coordinate,
            cumulative_distance_meters: round_to_centimeters(total),
        });
        previous = Some(coordinate);
    }

    debug!("derived {} waypoints, total distance {:.2}m", waypoints.len(), total);

    Ok(WaypointList {
        kind,
        waypoints,
    })
}

/// Builds the combined vertex run for an insert-segment splice: `added` goes in at
/// `splice_index`, everything else keeps drawing order.
pub(crate) fn splice_vertices(original: &[Position], splice_index: usize, added: &[Position]) -> Vec<Position> {
    let mut combined = Vec::with_capacity(original.len() + added.len());
    combined.extend_from_slice(&original[..splice_index]);
    combined.extend_from_slice(added);
    combined.extend_from_slice(&original[splice_index..]);
    combined
}

fn round_to_centimeters(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}
