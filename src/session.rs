use log::{debug, trace};
use thiserror::Error;

use crate::projection::{ProjectionError, Projector};
use crate::spacial::Position;
use crate::waypoint::{derive_waypoints, splice_vertices, RawGeometry, WaypointList};
use crate::{DrawKind, InsertPosition};

/// Opaque identifier for one pointer interaction attached to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionHandle(pub u64);

/// The map collaborator that owns pointer interactions and the finish-key binding.
///
/// [`DrawSession`] guarantees that `detach_interaction` and `deregister_finish_listener`
/// are called on every exit path, including drop of an active session, so listeners never
/// outlive the interaction they act on.
pub trait DrawSurface {
    fn start_interaction(&mut self, kind: DrawKind) -> InteractionHandle;
    fn detach_interaction(&mut self, handle: InteractionHandle);

    /// Forces the in-progress interaction to complete early, returning whatever geometry
    /// it has accumulated so far (ring-closed for polygons).
    fn finalize_current_geometry(&mut self, handle: InteractionHandle) -> RawGeometry;

    /// Binds the finish key for the duration of an active session.
    fn register_finish_listener(&mut self);
    fn deregister_finish_listener(&mut self);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn start_interaction(&mut self, kind: DrawKind) -> InteractionHandle {
        (**self).start_interaction(kind)
    }

    fn detach_interaction(&mut self, handle: InteractionHandle) {
        (**self).detach_interaction(handle)
    }

    fn finalize_current_geometry(&mut self, handle: InteractionHandle) -> RawGeometry {
        (**self).finalize_current_geometry(handle)
    }

    fn register_finish_listener(&mut self) {
        (**self).register_finish_listener()
    }

    fn deregister_finish_listener(&mut self) {
        (**self).deregister_finish_listener()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// The insert-segment anchor does not address a waypoint in the published list.
    #[error("anchor index {index} out of range for waypoint list of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

#[derive(Debug)]
struct ActiveDraw {
    handle: InteractionHandle,
    kind: DrawKind,
    vertices: Vec<Position>,
    /// Resolved insertion index into the published vertex run, for insert-segment sessions.
    splice: Option<usize>,
}

#[derive(Debug)]
struct Published {
    /// The raw vertex run the list was derived from, retained so an insert-segment
    /// splice can re-derive the whole combined run.
    vertices: Vec<Position>,
    list: WaypointList,
}

/// State machine for one map context's drawing interactions.
///
/// At most one interaction is active at a time; starting a new one implicitly cancels the
/// old one first. Vertex-commit and finish signals that arrive while idle are ignored
/// rather than treated as errors, since the surface may keep emitting briefly after a
/// cancel. All transitions are synchronous.
pub struct DrawSession<S: DrawSurface, P: Projector> {
    surface: S,
    projector: P,
    active: Option<ActiveDraw>,
    published: Option<Published>,
}

impl<S: DrawSurface, P: Projector> DrawSession<S, P> {
    pub fn new(surface: S, projector: P) -> Self {
        Self {
            surface,
            projector,
            active: None,
            published: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The list published by the last completed interaction, if any.
    pub fn last_waypoints(&self) -> Option<&WaypointList> {
        self.published.as_ref().map(|published| &published.list)
    }

    /// Vertices committed to the working buffer so far; empty while idle.
    pub fn committed_vertices(&self) -> &[Position] {
        self.active
            .as_ref()
            .map(|active| active.vertices.as_slice())
            .unwrap_or(&[])
    }

    /// Starts a new drawing interaction, implicitly cancelling any active one first.
    pub fn start(&mut self, kind: DrawKind) {
        self.begin(kind, None);
    }

    /// Appends a committed vertex to the working buffer. Ignored while idle.
    pub fn on_vertex_committed(&mut self, vertex: Position) {
        match self.active.as_mut() {
            Some(active) => active.vertices.push(vertex),
            None => trace!("vertex commit ignored while idle"),
        }
    }

    /// Completes the active interaction with the surface's final geometry, then derives
    /// and publishes a fresh waypoint list.
    ///
    /// `Ok(Some(list))` is the waypoints-ready signal for the presentation collaborator;
    /// `Ok(None)` means the signal arrived while idle and was ignored. A projection
    /// failure leaves the previously published list untouched; the interaction is
    /// detached either way.
    pub fn on_geometry_complete(&mut self, geometry: RawGeometry) -> Result<Option<WaypointList>, SessionError> {
        let Some(active) = self.active.take() else {
            trace!("geometry completion ignored while idle");
            return Ok(None);
        };
        self.detach(&active);

        let drawn = geometry.primary_vertices();
        let vertices = match active.splice {
            Some(splice_index) => {
                let base = self
                    .published
                    .as_ref()
                    .map(|published| published.vertices.as_slice())
                    .unwrap_or(&[]);
                splice_vertices(base, splice_index, drawn)
            }
            None => drawn.to_vec(),
        };

        let list = derive_waypoints(&vertices, active.kind, &self.projector)?;
        debug!("session complete: kind {:?}, {} waypoints published", active.kind, list.len());

        self.published = Some(Published {
            vertices,
            list: list.clone(),
        });
        Ok(Some(list))
    }

    /// Explicit finish command (the bound key): forces the surface to finalize the
    /// current geometry, then completes as usual. No-op while idle.
    pub fn on_finish_command(&mut self) -> Result<Option<WaypointList>, SessionError> {
        let Some(handle) = self.active.as_ref().map(|active| active.handle) else {
            trace!("finish command ignored while idle");
            return Ok(None);
        };
        let geometry = self.surface.finalize_current_geometry(handle);
        self.on_geometry_complete(geometry)
    }

    /// Discards the working buffer and detaches the interaction without publishing.
    /// No-op while idle.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            debug!("session cancelled with {} committed vertices", active.vertices.len());
            self.detach(&active);
        }
    }

    /// Starts a new interaction whose geometry will be spliced into the published list
    /// before or after the waypoint at `anchor_index`, re-deriving the whole combined
    /// list on completion.
    pub fn request_insert_segment(&mut self, anchor_index: usize, position: InsertPosition) -> Result<(), SessionError> {
        let Some(published) = self.published.as_ref() else {
            return Err(SessionError::OutOfRange {
                index: anchor_index,
                len: 0,
            });
        };
        if anchor_index >= published.list.len() {
            return Err(SessionError::OutOfRange {
                index: anchor_index,
                len: published.list.len(),
            });
        }

        let splice_index = match position {
            InsertPosition::Before => anchor_index,
            InsertPosition::After => anchor_index + 1,
        };
        self.begin(published.list.kind(), Some(splice_index));
        Ok(())
    }

    fn begin(&mut self, kind: DrawKind, splice: Option<usize>) {
        if self.active.is_some() {
            debug!("start requested while active, cancelling previous interaction");
            self.cancel();
        }

        let handle = self.surface.start_interaction(kind);
        self.surface.register_finish_listener();
        trace!("session active: kind {:?}, handle {:?}", kind, handle);

        self.active = Some(ActiveDraw {
            handle,
            kind,
            vertices: Vec::new(),
            splice,
        });
    }

    fn detach(&mut self, active: &ActiveDraw) {
        self.surface.deregister_finish_listener();
        self.surface.detach_interaction(active.handle);
    }
}

impl<S: DrawSurface, P: Projector> Drop for DrawSession<S, P> {
    fn drop(&mut self) {
        // teardown counts as an exit path: the finish listener must not outlive the session
        self.cancel();
    }
}
