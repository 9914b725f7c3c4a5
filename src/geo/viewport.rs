//! Viewport fitting
//!
//! Computes the map region that frames the current result set. Unresolved
//! locations never contribute to the fit; when nothing is plottable the
//! configured default view is returned instead of degenerate bounds.

use crate::config::MapConfig;
use crate::geo::Coordinates;
use crate::types::Challenge;

/// A bounding rectangle in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Geometric center of the box
    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: (self.south + self.north) / 2.0,
            longitude: (self.west + self.east) / 2.0,
        }
    }

    /// Whether a point lies inside the box (inclusive)
    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// The computed map view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Fit these bounds
    Bounds(BoundingBox),
    /// Fall back to a fixed center and zoom
    Center { center: Coordinates, zoom: u8 },
}

/// Fit a viewport around every resolved challenge location.
///
/// Pure and idempotent: the same input always yields the same viewport.
pub fn fit_viewport(challenges: &[Challenge], config: &MapConfig) -> Viewport {
    fit_points(
        challenges
            .iter()
            .filter(|c| c.location.is_resolved())
            .map(|c| c.location.coordinates()),
        config,
    )
}

/// Fit a viewport around a set of points, expanded by the configured padding.
pub fn fit_points(points: impl IntoIterator<Item = Coordinates>, config: &MapConfig) -> Viewport {
    let mut bounds: Option<BoundingBox> = None;
    for point in points {
        bounds = Some(match bounds {
            None => BoundingBox {
                south: point.latitude,
                west: point.longitude,
                north: point.latitude,
                east: point.longitude,
            },
            Some(b) => BoundingBox {
                south: b.south.min(point.latitude),
                west: b.west.min(point.longitude),
                north: b.north.max(point.latitude),
                east: b.east.max(point.longitude),
            },
        });
    }

    match bounds {
        Some(b) => {
            let pad = config.fit_padding_deg;
            Viewport::Bounds(BoundingBox {
                south: (b.south - pad).max(-90.0),
                west: (b.west - pad).max(-180.0),
                north: (b.north + pad).min(90.0),
                east: (b.east + pad).min(180.0),
            })
        }
        None => Viewport::Center {
            center: Coordinates {
                latitude: config.default_latitude,
                longitude: config.default_longitude,
            },
            zoom: config.default_zoom,
        },
    }
}
