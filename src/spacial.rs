/// A coordinate in the map's working projection, as delivered by the drawing surface.
///
/// Opaque to everything except a [`crate::Projector`].
pub type Position = nalgebra::Point2<f64>;

pub trait FromTuple2 {
    fn from(value: (f64, f64)) -> Self;
}

impl FromTuple2 for Position {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}
