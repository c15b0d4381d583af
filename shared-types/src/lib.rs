use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zoom used after a successful device geolocation fix.
pub const DEVICE_FIX_ZOOM: u8 = 13;
/// Zoom used when centering on a search result.
pub const SEARCH_RESULT_ZOOM: u8 = 15;
/// World-level zoom for the fallback viewport.
pub const FALLBACK_ZOOM: u8 = 2;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A named point on the map. `id` is assigned by the backend on save; a
/// place without one is a transient search result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    pub id: Option<i64>,
    pub name: String,
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

impl Place {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            zoom: FALLBACK_ZOOM,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum NearbyCategory {
    Restaurant,
    GasStation,
}

/// Result of asking the backend to persist a place. A duplicate is an
/// expected outcome, not an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Place),
    Duplicate,
}

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum ServiceError {
    #[error("no match found")]
    NotFound,
    #[error("geolocation unavailable")]
    Unavailable,
    #[error("backend unreachable: {0}")]
    Transport(String),
}
