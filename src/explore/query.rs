// src/explore/query.rs
use crate::api::{ApiError, HouseApi};
use crate::domain::Listing;
use crate::explore::bounds::ParsedBounds;

/// Outcome of one listings query. `data` is `None` while a refetch is
/// outstanding or when the request failed.
#[derive(Debug)]
pub struct QueryResult {
    pub data: Option<Vec<Listing>>,
    pub error: Option<ApiError>,
}

pub struct ListingQuery<'a> {
    api: &'a dyn HouseApi,
}

impl<'a> ListingQuery<'a> {
    pub fn new(api: &'a dyn HouseApi) -> Self {
        Self { api }
    }

    pub fn run(&self, bounds: &ParsedBounds) -> QueryResult {
        if !bounds.is_well_formed() {
            tracing::warn!(?bounds, "querying with inverted bounds");
        }
        match self.api.houses(bounds) {
            Ok(houses) => QueryResult {
                data: Some(houses),
                error: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "houses query failed");
                QueryResult {
                    data: None,
                    error: Some(e),
                }
            }
        }
    }
}
