use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 5.0;
pub const MAX_ZOOM: f64 = 15.0;

/// Camera position of the map: center plus zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            latitude: 40.353,
            longitude: -74.657,
            zoom: 10.0,
        }
    }
}

impl Viewport {
    /// Clamp into the ranges the map accepts.
    pub fn clamped(self) -> Self {
        Self {
            latitude: self.latitude.clamp(-90.0, 90.0),
            longitude: self.longitude.clamp(-180.0, 180.0),
            zoom: self.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }
}
