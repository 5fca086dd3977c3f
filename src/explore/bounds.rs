// src/explore/bounds.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored before the map has reported any real bounds.
pub const FALLBACK_BOUNDS: &str = "[[0,0],[0,0]]";

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("bounds are not valid JSON: {0}")]
    Json(String),
    #[error("bounds must be [[swLng, swLat], [neLng, neLat]]")]
    Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Southwest / northeast corners of the visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedBounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl ParsedBounds {
    /// sw <= ne on both axes. Not checked by the parser.
    pub fn is_well_formed(&self) -> bool {
        self.sw.latitude <= self.ne.latitude && self.sw.longitude <= self.ne.longitude
    }

    /// Inclusive on every edge.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.sw.latitude
            && latitude <= self.ne.latitude
            && longitude >= self.sw.longitude
            && longitude <= self.ne.longitude
    }

    /// Serialize back into the map's `[[lng, lat], [lng, lat]]` form.
    pub fn to_bounds_string(&self) -> String {
        let corners = [
            [self.sw.longitude, self.sw.latitude],
            [self.ne.longitude, self.ne.latitude],
        ];
        serde_json::to_string(&corners).unwrap_or_else(|_| FALLBACK_BOUNDS.to_string())
    }
}

/// Parse `[[swLng, swLat], [neLng, neLat]]` into corner points.
pub fn parse_bounds(raw: &str) -> Result<ParsedBounds, BoundsError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| BoundsError::Json(e.to_string()))?;

    let corners: [[f64; 2]; 2] = serde_json::from_value(value).map_err(|_| BoundsError::Shape)?;

    Ok(ParsedBounds {
        sw: LatLng {
            latitude: corners[0][1],
            longitude: corners[0][0],
        },
        ne: LatLng {
            latitude: corners[1][1],
            longitude: corners[1][0],
        },
    })
}

/// Views never fail on bad stored bounds; they query the fallback instead.
pub fn parse_bounds_or_fallback(raw: &str) -> ParsedBounds {
    match parse_bounds(raw) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(raw, error = %e, "discarding malformed bounds");
            let zero = LatLng {
                latitude: 0.0,
                longitude: 0.0,
            };
            ParsedBounds { sw: zero, ne: zero }
        }
    }
}
