use crate::app::App;
use crate::errors::ServerError;
use crate::handlers::{assets, explore, houses};
use crate::responses::{text_response, ResultResp};
use crate::session::ViewSession;
use astra::Request;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    // Stateless routes never mint a view session.
    match (method.as_str(), path.as_str()) {
        ("GET", "/healthz") => return text_response("ok"),
        ("GET", p) if p.starts_with("/static/") => return assets::serve(p),
        _ => {}
    }

    let session = ViewSession::from_request(&req);

    tracing::debug!(%method, %path, new_session = session.is_new, "request");

    let mut resp = match (method.as_str(), path.as_str()) {
        ("GET", "/") => explore::home(req, app, &session),
        ("GET", "/houses/panel") => explore::panel(req, app, &session),
        ("POST", "/map/viewport") => explore::viewport(req, app, &session),
        ("POST", "/map/bounds") => explore::bounds(req, app, &session),
        ("GET", "/map/popup") => explore::map_popup(req, app, &session),
        ("GET", "/houses/new") => houses::new_form(req, app),
        ("POST", "/houses/new") => houses::create(req, app),
        _ => Err(ServerError::NotFound),
    }?;

    if session.is_new {
        let cookie = session
            .set_cookie_header()
            .parse()
            .map_err(|_| ServerError::InternalError)?;
        resp.headers_mut().append("Set-Cookie", cookie);
    }

    Ok(resp)
}
