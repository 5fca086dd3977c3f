// src/api/graphql.rs
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{ApiError, BoundsInput, CreatedHouse, HouseApi, HouseInput, ImageSignature};
use crate::domain::Listing;

const HOUSES_QUERY: &str = r#"
  query HousesQuery($bounds: BoundsInput!) {
    houses(bounds: $bounds) {
      id
      latitude
      longitude
      address
      publicId
      bedrooms
    }
  }
"#;

const SIGNATURE_MUTATION: &str = r#"
  mutation CreateSignatureMutation {
    createImageSignature {
      signature
      timestamp
    }
  }
"#;

const CREATE_HOUSE_MUTATION: &str = r#"
  mutation CreateHouseMutation($input: HouseInput!) {
    createHouse(input: $input) {
      id
    }
  }
"#;

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Deserialize)]
struct HousesData {
    houses: Vec<Listing>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureData {
    create_image_signature: ImageSignature,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateHouseData {
    create_house: Option<CreatedHouse>,
}

pub struct GraphqlClient {
    endpoint: String,
    client: Client,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    fn execute<V, D>(&self, query: &str, variables: V) -> Result<D, ApiError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables })
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode_response(status, &body)
    }
}

/// Turn a raw GraphQL HTTP response into its `data`, surfacing the first
/// reported error.
pub(crate) fn decode_response<D: DeserializeOwned>(status: u16, body: &str) -> Result<D, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            body: body.to_string(),
        });
    }

    let parsed: GraphqlResponse<D> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if let Some(first) = parsed.errors.first() {
        return Err(ApiError::Graphql(first.message.clone()));
    }

    parsed
        .data
        .ok_or_else(|| ApiError::Decode("response carried no data".into()))
}

impl HouseApi for GraphqlClient {
    fn houses(&self, bounds: &BoundsInput) -> Result<Vec<Listing>, ApiError> {
        let data: HousesData = self.execute(HOUSES_QUERY, json!({ "bounds": bounds }))?;
        tracing::debug!(count = data.houses.len(), "houses query returned");
        Ok(data.houses)
    }

    fn create_image_signature(&self) -> Result<ImageSignature, ApiError> {
        let data: SignatureData = self.execute(SIGNATURE_MUTATION, json!({}))?;
        Ok(data.create_image_signature)
    }

    fn create_house(&self, input: &HouseInput) -> Result<CreatedHouse, ApiError> {
        let data: CreateHouseData = self.execute(CREATE_HOUSE_MUTATION, json!({ "input": input }))?;
        data.create_house
            .ok_or_else(|| ApiError::Decode("createHouse returned null".into()))
    }
}
