// src/handlers/explore.rs
use std::time::Instant;

use astra::Request;

use crate::app::App;
use crate::db::view_state::{ViewStateStore, KEY_BOUNDS, KEY_VIEWPORT};
use crate::domain::Viewport;
use crate::errors::{ResultResp, ServerError};
use crate::explore::map_view::{effect_of, MapEffect, MapEvent, Popup};
use crate::explore::query::{ListingQuery, QueryResult};
use crate::explore::{parse_bounds_or_fallback, PanelPlan, FALLBACK_BOUNDS};
use crate::handlers::{field, parse_query, read_form};
use crate::responses::{html_response, no_content};
use crate::session::ViewSession;
use crate::templates::components::{popup, MapVm};
use crate::templates::pages::{home_error_page, home_page, houses_panel, PanelVm};

/// Listings to show right now, or `None` if the query failed.
fn load_panel(app: &App, session: &ViewSession, now: Instant) -> Result<Option<PanelVm>, ServerError> {
    let store = ViewStateStore::new(&app.db, session.hash());
    let persisted_bounds = || store.get(KEY_BOUNDS, FALLBACK_BOUNDS.to_string());

    let plan = app
        .explore
        .with_session(&session.id, now, persisted_bounds, |s| s.plan(now))?;

    match plan {
        PanelPlan::Pending { cached, retry_in } => Ok(Some(PanelVm {
            houses: cached.unwrap_or_default(),
            refetch_in: Some(retry_in),
        })),
        PanelPlan::Fresh { houses } => Ok(Some(PanelVm {
            houses,
            refetch_in: None,
        })),
        PanelPlan::Fetch { bounds, ticket, .. } => {
            let parsed = parse_bounds_or_fallback(&bounds);
            // No lock held across the network call.
            let QueryResult { data, error } = ListingQuery::new(app.api.as_ref()).run(&parsed);

            let houses = app
                .explore
                .with_session(&session.id, Instant::now(), persisted_bounds, |s| {
                    s.apply(ticket, &bounds, data)
                })?;

            if error.is_some() {
                return Ok(None);
            }
            Ok(Some(PanelVm {
                houses,
                refetch_in: None,
            }))
        }
    }
}

pub fn home(_req: Request, app: &App, session: &ViewSession) -> ResultResp {
    let store = ViewStateStore::new(&app.db, session.hash());
    let viewport = store.get(KEY_VIEWPORT, Viewport::default())?;

    let Some(panel) = load_panel(app, session, Instant::now())? else {
        return html_response(home_error_page());
    };

    let map = MapVm {
        viewport,
        token: &app.config.mapbox_token,
        style: &app.config.mapbox_style,
    };
    html_response(home_page(&map, &panel, app.images.as_ref()))
}

pub fn panel(_req: Request, app: &App, session: &ViewSession) -> ResultResp {
    match load_panel(app, session, Instant::now())? {
        Some(panel) => html_response(houses_panel(&panel, app.images.as_ref())),
        None => html_response(crate::templates::components::houses_error()),
    }
}

fn parse_f64(pairs: &[(String, String)], name: &str) -> Result<f64, ServerError> {
    field(pairs, name)
        .ok_or_else(|| ServerError::BadRequest(format!("missing {name}")))?
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("{name} must be a number")))
}

fn apply_effect(app: &App, session: &ViewSession, effect: MapEffect) -> Result<(), ServerError> {
    let store = ViewStateStore::new(&app.db, session.hash());
    match effect {
        MapEffect::SaveViewport(v) => store.set(KEY_VIEWPORT, &v),
        MapEffect::SaveBounds(raw) => {
            let previous = store.get(KEY_BOUNDS, FALLBACK_BOUNDS.to_string())?;
            store.set(KEY_BOUNDS, &raw)?;
            tracing::debug!(bounds = %raw, "bounds updated");
            let now = Instant::now();
            app.explore
                .with_session(&session.id, now, || Ok(previous), |s| s.record_bounds(raw, now))
        }
        MapEffect::Ignore => Ok(()),
    }
}

pub fn viewport(req: Request, app: &App, session: &ViewSession) -> ResultResp {
    let form = read_form(req)?;
    let viewport = Viewport {
        latitude: parse_f64(&form, "latitude")?,
        longitude: parse_f64(&form, "longitude")?,
        zoom: parse_f64(&form, "zoom")?,
    };
    apply_effect(app, session, effect_of(MapEvent::ViewportChange(viewport)).map_err(bad_bounds)?)?;
    no_content()
}

pub fn bounds(req: Request, app: &App, session: &ViewSession) -> ResultResp {
    let form = read_form(req)?;
    let raw = field(&form, "bounds")
        .ok_or_else(|| ServerError::BadRequest("missing bounds".into()))?
        .to_string();

    let event = match field(&form, "event") {
        Some("load") => MapEvent::Load { bounds: raw },
        Some("interaction") | None => MapEvent::InteractionStateChange {
            is_dragging: field(&form, "dragging") == Some("true"),
            bounds: raw,
        },
        Some(other) => {
            return Err(ServerError::BadRequest(format!("unknown map event {other}")));
        }
    };

    apply_effect(app, session, effect_of(event).map_err(bad_bounds)?)?;
    no_content()
}

fn bad_bounds(e: crate::explore::bounds::BoundsError) -> ServerError {
    ServerError::BadRequest(e.to_string())
}

pub fn map_popup(req: Request, app: &App, session: &ViewSession) -> ResultResp {
    let query = parse_query(&req);
    let id = field(&query, "id").ok_or_else(|| ServerError::BadRequest("missing id".into()))?;

    // Popups only exist for markers this session was shown.
    let house = app
        .explore
        .with_existing(&session.id, |s| {
            s.cached().and_then(|houses| houses.iter().find(|h| h.id == id).cloned())
        })?
        .flatten()
        .ok_or(ServerError::NotFound)?;
    html_response(popup(&Popup::for_listing(&house, app.images.as_ref())))
}
