pub mod token;

use astra::Request;

pub use token::{generate_session_id, hash_session_id};

pub const COOKIE_NAME: &str = "view_session";

/// Browser-scoped handle for persisted map/list state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSession {
    pub id: String,
    /// True when the id was minted for this request and must be set as a cookie.
    pub is_new: bool,
}

impl ViewSession {
    /// Reuse the cookie's session id, or mint a fresh one.
    pub fn from_request(req: &Request) -> Self {
        match cookie_value(req, COOKIE_NAME) {
            Some(id) if token::is_plausible_session_id(&id) => Self { id, is_new: false },
            _ => Self {
                id: generate_session_id(),
                is_new: true,
            },
        }
    }

    pub fn hash(&self) -> [u8; 32] {
        hash_session_id(&self.id)
    }

    pub fn set_cookie_header(&self) -> String {
        format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=31536000",
            self.id
        )
    }
}

pub fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}
