// src/explore/map_view.rs
use crate::api::ImageHost;
use crate::domain::{Listing, Viewport};
use crate::explore::bounds::{parse_bounds, BoundsError};

pub const POPUP_TITLE_CHARS: usize = 30;
pub const POPUP_IMAGE_WIDTH: u32 = 200;

/// What the browser map reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pan/zoom in progress; reported continuously.
    ViewportChange(Viewport),
    Load { bounds: String },
    InteractionStateChange { is_dragging: bool, bounds: String },
}

/// Which piece of persisted state an event should overwrite.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEffect {
    SaveViewport(Viewport),
    SaveBounds(String),
    Ignore,
}

/// Bounds only propagate at load and once a drag has ended, never mid-drag.
pub fn effect_of(event: MapEvent) -> Result<MapEffect, BoundsError> {
    match event {
        MapEvent::ViewportChange(v) => Ok(MapEffect::SaveViewport(v.clamped())),
        MapEvent::Load { bounds } => normalized(&bounds).map(MapEffect::SaveBounds),
        MapEvent::InteractionStateChange { is_dragging: true, .. } => Ok(MapEffect::Ignore),
        MapEvent::InteractionStateChange {
            is_dragging: false,
            bounds,
        } => normalized(&bounds).map(MapEffect::SaveBounds),
    }
}

// Whatever we persist must parse again later.
fn normalized(raw: &str) -> Result<String, BoundsError> {
    parse_bounds(raw).map(|b| b.to_bounds_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub fn markers(houses: &[Listing]) -> Vec<Marker> {
    houses
        .iter()
        .map(|h| Marker {
            id: h.id.clone(),
            latitude: h.latitude,
            longitude: h.longitude,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub image_url: String,
    pub image_width: u32,
    pub image_height: u32,
    pub href: String,
}

impl Popup {
    pub fn for_listing(house: &Listing, images: &dyn ImageHost) -> Self {
        let height = POPUP_IMAGE_WIDTH * 9 / 16;
        Self {
            latitude: house.latitude,
            longitude: house.longitude,
            title: house.short_address(POPUP_TITLE_CHARS).to_string(),
            image_url: images.delivery_url(&house.public_id, POPUP_IMAGE_WIDTH, height),
            image_width: POPUP_IMAGE_WIDTH,
            image_height: height,
            href: house.href(),
        }
    }
}
