//! Test doubles for the drawing-surface collaborator.

use std::collections::VecDeque;

use crate::projection::Projector;
use crate::session::{DrawSurface, InteractionHandle};
use crate::spacial::{FromTuple2, Position};
use crate::waypoint::RawGeometry;
use crate::{DrawKind, GeoPoint, WebMercator};

/// Records every interaction and listener transition so tests can assert that
/// acquisition and release stay paired on every exit path.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    pub started: Vec<(InteractionHandle, DrawKind)>,
    pub detached: Vec<InteractionHandle>,
    pub finalized: Vec<InteractionHandle>,
    pub listeners_registered: usize,
    pub listeners_deregistered: usize,
    /// Geometry served by `finalize_current_geometry`, front first; an empty path
    /// when the queue runs dry.
    pub pending_geometry: VecDeque<RawGeometry>,
}

impl RecordingSurface {
    pub fn listener_active(&self) -> bool {
        self.listeners_registered > self.listeners_deregistered
    }
}

impl DrawSurface for RecordingSurface {
    fn start_interaction(&mut self, kind: DrawKind) -> InteractionHandle {
        self.next_handle += 1;
        let handle = InteractionHandle(self.next_handle);
        self.started.push((handle, kind));
        handle
    }

    fn detach_interaction(&mut self, handle: InteractionHandle) {
        self.detached.push(handle);
    }

    fn finalize_current_geometry(&mut self, handle: InteractionHandle) -> RawGeometry {
        self.finalized.push(handle);
        self.pending_geometry
            .pop_front()
            .unwrap_or(RawGeometry::Path(Vec::new()))
    }

    fn register_finish_listener(&mut self) {
        self.listeners_registered += 1;
    }

    fn deregister_finish_listener(&mut self) {
        self.listeners_deregistered += 1;
    }
}

/// Projects a lon/lat path into web-mercator positions, for feeding a session the way
/// the drawing surface would.
pub fn projected_path(lonlat: &[(f64, f64)]) -> Vec<Position> {
    lonlat
        .iter()
        .map(|&(longitude, latitude)| {
            WebMercator
                .project(GeoPoint::new(longitude, latitude))
                .expect("coordinate must be projectable")
        })
        .collect()
}

/// Builds raw positions directly from coordinate pairs.
pub fn positions(pairs: &[(f64, f64)]) -> Vec<Position> {
    pairs
        .iter()
        .map(|&pair| FromTuple2::from(pair))
        .collect()
}
