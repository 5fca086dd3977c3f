// src/handlers/assets.rs
use astra::{Body, ResponseBuilder};

use crate::errors::{ResultResp, ServerError};

const MAIN_CSS: &str = include_str!("../../static/main.css");
const HOME_SVG: &str = include_str!("../../static/home-solid.svg");

pub fn serve(path: &str) -> ResultResp {
    let (body, content_type) = match path {
        "/static/main.css" => (MAIN_CSS, mime::TEXT_CSS_UTF_8.as_ref()),
        "/static/home-solid.svg" => (HOME_SVG, mime::IMAGE_SVG.as_ref()),
        _ => return Err(ServerError::NotFound),
    };

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=86400")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
