//! Location codec
//!
//! Challenge locations arrive in one of two wire encodings, both with
//! longitude first (the order the backend stores):
//! - a well-known-text point string: `POINT(<lng> <lat>)`
//! - a structured object: `{"coordinates": [<lng>, <lat>]}`
//!
//! Both are decoded exactly once, at deserialization, into [`Location`].
//! Anything malformed, missing, or out of range becomes
//! [`Location::Unresolved`] rather than an error; the (0,0) fallback is
//! reachable through [`Location::coordinates`] but is never mistaken for a
//! real point because [`Location::is_resolved`] reports it.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A decoded coordinate pair, latitude first (the order map consumers use)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Whether the pair lies on the globe
    pub fn in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A challenge location after boundary decoding
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Location {
    /// A valid point on the globe
    Point(Coordinates),
    /// The encoding was missing, malformed, or out of range
    #[default]
    Unresolved,
}

/// Fallback coordinates for unresolved locations
const FALLBACK: Coordinates = Coordinates { latitude: 0.0, longitude: 0.0 };

impl Location {
    /// Build a location from a latitude/longitude pair.
    ///
    /// Out-of-range or non-finite input degrades to `Unresolved`.
    pub fn point(latitude: f64, longitude: f64) -> Location {
        let coords = Coordinates { latitude, longitude };
        if coords.in_range() {
            Location::Point(coords)
        } else {
            Location::Unresolved
        }
    }

    /// Coordinates for plotting; `(0, 0)` when unresolved.
    pub fn coordinates(&self) -> Coordinates {
        match self {
            Location::Point(coords) => *coords,
            Location::Unresolved => FALLBACK,
        }
    }

    /// Whether this location decoded to a real point
    pub fn is_resolved(&self) -> bool {
        matches!(self, Location::Point(_))
    }

    /// Serialize back into the WKT point form, longitude first.
    ///
    /// Unresolved locations have no wire form.
    pub fn to_wkt(&self) -> Option<String> {
        match self {
            Location::Point(coords) => {
                Some(format!("POINT({} {})", coords.longitude, coords.latitude))
            }
            Location::Unresolved => None,
        }
    }
}

/// Parse a WKT point string: `POINT(<lng> <lat>)`
fn parse_wkt(raw: &str) -> Option<Coordinates> {
    let inner = raw
        .trim()
        .strip_prefix("POINT(")?
        .strip_suffix(')')?;
    let mut parts = inner.split_whitespace();
    let longitude: f64 = parts.next()?.parse().ok()?;
    let latitude: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinates { latitude, longitude })
}

/// Raw wire shapes, matched in order
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Wkt(String),
    GeoJson { coordinates: [f64; 2] },
    Other(serde_json::Value),
}

impl From<RawLocation> for Location {
    fn from(raw: RawLocation) -> Self {
        let coords = match raw {
            RawLocation::Wkt(s) => parse_wkt(&s),
            // [lng, lat] on the wire
            RawLocation::GeoJson { coordinates } => Some(Coordinates {
                latitude: coordinates[1],
                longitude: coordinates[0],
            }),
            RawLocation::Other(_) => None,
        };
        match coords {
            Some(c) if c.in_range() => Location::Point(c),
            _ => Location::Unresolved,
        }
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RawLocation::deserialize(deserializer)?.into())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_wkt() {
            Some(wkt) => serializer.serialize_str(&wkt),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wkt_point() {
        let loc: Location = serde_json::from_str("\"POINT(29.8739 -1.9403)\"").unwrap();
        assert!(loc.is_resolved());
        let coords = loc.coordinates();
        assert_eq!(coords.latitude, -1.9403);
        assert_eq!(coords.longitude, 29.8739);
    }

    #[test]
    fn decodes_geojson_point() {
        let loc: Location = serde_json::from_str("{\"coordinates\": [29.8739, -1.9403]}").unwrap();
        assert_eq!(
            loc.coordinates(),
            Coordinates { latitude: -1.9403, longitude: 29.8739 }
        );
    }

    #[test]
    fn malformed_input_is_unresolved() {
        for raw in ["\"garbage\"", "null", "42", "{\"x\": 1}", "\"POINT(a b)\""] {
            let loc: Location = serde_json::from_str(raw).unwrap();
            assert!(!loc.is_resolved(), "expected unresolved for {raw}");
            assert_eq!(loc.coordinates(), Coordinates { latitude: 0.0, longitude: 0.0 });
        }
    }

    #[test]
    fn out_of_range_is_unresolved() {
        let loc: Location = serde_json::from_str("\"POINT(200.0 10.0)\"").unwrap();
        assert!(!loc.is_resolved());
        assert_eq!(Location::point(95.0, 0.0), Location::Unresolved);
    }

    #[test]
    fn wkt_round_trip() {
        let original = Location::point(30.0, -1.95);
        let wkt = original.to_wkt().unwrap();
        assert_eq!(wkt, "POINT(-1.95 30)");
        let decoded = parse_wkt(&wkt).unwrap();
        assert!((decoded.latitude - 30.0).abs() < 1e-9);
        assert!((decoded.longitude - (-1.95)).abs() < 1e-9);
    }

    #[test]
    fn unresolved_has_no_wire_form() {
        assert_eq!(Location::Unresolved.to_wkt(), None);
    }
}
