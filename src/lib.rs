mod geodesic;
mod projection;
mod session;
mod spacial;
mod waypoint;

pub use geodesic::*;
pub use projection::*;
pub use session::*;
pub use spacial::*;
pub use waypoint::*;

#[cfg(feature = "testing")]
pub mod testing;

/// The two geometries a drawing session can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawKind {
    /// An open path; finished by the user's final pointer action or the finish key.
    LineOpen,
    /// A closed loop; finished when the ring closes.
    PolygonClosed,
}

/// Where an inserted segment lands relative to its anchor waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}
