//! Client and map configuration

use serde::{Deserialize, Serialize};

/// Backend API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the Atlas HTTP API
    pub base_url: String,
    /// Optional API key for authenticated access
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Map presentation configuration
///
/// Supplies the fallback view used when a result set has no plottable
/// coordinates, plus the padding applied around fitted bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Default center latitude
    pub default_latitude: f64,
    /// Default center longitude
    pub default_longitude: f64,
    /// Default zoom level
    pub default_zoom: u8,
    /// Minimum zoom level
    pub min_zoom: u8,
    /// Maximum zoom level
    pub max_zoom: u8,
    /// Padding in degrees added on every side of fitted bounds
    pub fit_padding_deg: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: -1.9403,
            default_longitude: 29.8739,
            default_zoom: 8,
            min_zoom: 3,
            max_zoom: 18,
            fit_padding_deg: 0.05,
        }
    }
}
