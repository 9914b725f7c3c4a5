//! Geospatial primitives: location codec and viewport fitting

pub mod location;
pub mod viewport;

pub use location::{Coordinates, Location};
pub use viewport::{fit_points, fit_viewport, BoundingBox, Viewport};
