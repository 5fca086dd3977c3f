use serde::{Deserialize, Serialize};

/// A house as returned by the listings API. Read-only here; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Image host identifier for the listing photo.
    pub public_id: String,
    pub bedrooms: i64,
}

impl Listing {
    pub fn href(&self) -> String {
        format!("/houses/{}", self.id)
    }

    /// Address cut to `max` characters, on a char boundary.
    pub fn short_address(&self, max: usize) -> &str {
        match self.address.char_indices().nth(max) {
            Some((idx, _)) => &self.address[..idx],
            None => &self.address,
        }
    }
}
