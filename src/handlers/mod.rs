pub mod assets;
pub mod explore;
pub mod houses;

use std::io::Read;

use astra::Request;

use crate::errors::ServerError;

/// Upper bound on a request body; the new-house form carries the image.
const MAX_BODY_BYTES: u64 = 12 * 1024 * 1024;

pub fn read_form(req: Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;

    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }

    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

pub fn parse_query(req: &Request) -> Vec<(String, String)> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
