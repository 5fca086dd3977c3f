pub mod graphql;
pub mod image_host;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Listing;
use crate::explore::bounds::ParsedBounds;

pub use graphql::GraphqlClient;
pub use image_host::{CloudinaryUploader, ImageHost, UploadError, UploadedImage};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    Graphql(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Variables for `HousesQuery`; same shape as the parsed map bounds.
pub type BoundsInput = ParsedBounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSignature {
    pub signature: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseInput {
    pub address: String,
    pub image: String,
    pub coordinates: Coordinates,
    pub bedrooms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedHouse {
    pub id: String,
}

/// The listings backend. The GraphQL client is the production
/// implementation; tests substitute an in-memory one.
pub trait HouseApi: Send + Sync {
    fn houses(&self, bounds: &BoundsInput) -> Result<Vec<Listing>, ApiError>;
    fn create_image_signature(&self) -> Result<ImageSignature, ApiError>;
    fn create_house(&self, input: &HouseInput) -> Result<CreatedHouse, ApiError>;
}
