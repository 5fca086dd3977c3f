// src/tests/router_tests/explore_tests.rs
use crate::app::App;
use crate::config::AppConfig;
use crate::db::view_state::{ViewStateStore, KEY_BOUNDS, KEY_VIEWPORT};
use crate::domain::Viewport;
use crate::router::handle;
use crate::session::{generate_session_id, hash_session_id, COOKIE_NAME};
use crate::tests::utils::{
    body_string, form_body, house, session_cookie, test_app, test_app_with,
    test_app_with_config, FakeApi,
};
use astra::Body;
use http::{Method, Request};
use scraper::{Html, Selector};
use std::sync::atomic::Ordering;
use std::time::Duration;

const PRINCETON: &str = "[[-74.1,40.6],[-73.9,40.8]]";
const ELSEWHERE: &str = "[[-75.5,39.5],[-75.0,40.0]]";

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, cookie: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", cookie)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body(pairs))
        .unwrap()
}

/// A session whose persisted bounds are already `bounds`.
fn session_with_bounds(app: &App, bounds: &str) -> String {
    let id = generate_session_id();
    ViewStateStore::new(&app.db, hash_session_id(&id))
        .set(KEY_BOUNDS, bounds)
        .unwrap();
    format!("{COOKIE_NAME}={id}")
}

fn seed_princeton(api: &FakeApi) {
    *api.houses.lock().unwrap() = vec![
        house("1", 40.70, -74.00),
        house("2", 40.65, -74.05),
        house("3", 40.75, -73.95),
        house("far", 39.70, -75.20),
    ];
}

fn listed_ids(body: &str) -> Vec<String> {
    let doc = Html::parse_document(body);
    let sel = Selector::parse("ul.house-list li.house").unwrap();
    doc.select(&sel)
        .filter_map(|li| li.value().attr("data-id").map(str::to_string))
        .collect()
}

#[test]
fn home_page_sets_session_cookie_and_renders_map() {
    let (app, _, _) = test_app();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let cookie = session_cookie(&resp);
    assert!(cookie.starts_with("view_session="));

    let body = body_string(resp);
    let doc = Html::parse_document(&body);
    let map = doc
        .select(&Selector::parse("#map").unwrap())
        .next()
        .expect("map container");
    assert_eq!(map.value().attr("data-zoom"), Some("10"));
    assert!(body.contains("houses-panel"));
}

#[test]
fn home_lists_houses_inside_persisted_bounds() {
    let (app, api, _) = test_app();
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, PRINCETON);

    let resp = handle(get("/", &cookie), &app).unwrap();
    assert!(resp.headers().get("Set-Cookie").is_none());

    let mut ids = listed_ids(&body_string(resp));
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn refetch_in_flight_keeps_showing_cached_houses() {
    let (app, api, _) = test_app();
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, PRINCETON);

    let first = body_string(handle(get("/houses/panel", &cookie), &app).unwrap());
    assert_eq!(listed_ids(&first).len(), 3);

    let resp = handle(
        post("/map/bounds", &cookie, &[("bounds", ELSEWHERE), ("event", "interaction"), ("dragging", "false")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 204);

    let body = body_string(handle(get("/houses/panel", &cookie), &app).unwrap());
    assert_eq!(listed_ids(&body).len(), 3, "cached houses, not an empty list");
    assert!(body.contains("load delay:"), "panel should schedule its own refetch");
    assert_eq!(api.queries.load(Ordering::SeqCst), 1);
}

#[test]
fn settled_bounds_trigger_a_new_query() {
    let (app, api, _) = test_app_with(Duration::ZERO);
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, PRINCETON);

    handle(get("/houses/panel", &cookie), &app).unwrap();
    handle(
        post("/map/bounds", &cookie, &[("bounds", ELSEWHERE), ("event", "interaction")]),
        &app,
    )
    .unwrap();

    let body = body_string(handle(get("/houses/panel", &cookie), &app).unwrap());
    assert_eq!(listed_ids(&body), vec!["far"]);
    assert!(!body.contains("load delay:"));
    assert_eq!(api.queries.load(Ordering::SeqCst), 2);
}

#[test]
fn unchanged_bounds_are_served_from_cache() {
    let (app, api, _) = test_app();
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, PRINCETON);

    handle(get("/houses/panel", &cookie), &app).unwrap();
    handle(get("/houses/panel", &cookie), &app).unwrap();
    assert_eq!(api.queries.load(Ordering::SeqCst), 1);
}

#[test]
fn bounds_are_not_written_while_dragging() {
    let (app, _, _) = test_app();
    let cookie = session_with_bounds(&app, PRINCETON);

    let resp = handle(
        post("/map/bounds", &cookie, &[("bounds", ELSEWHERE), ("event", "interaction"), ("dragging", "true")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 204);

    let id = cookie.trim_start_matches("view_session=");
    let stored: String = ViewStateStore::new(&app.db, hash_session_id(id))
        .get(KEY_BOUNDS, String::new())
        .unwrap();
    assert_eq!(stored, PRINCETON);
}

#[test]
fn malformed_bounds_are_rejected() {
    let (app, _, _) = test_app();
    let cookie = session_with_bounds(&app, PRINCETON);

    let res = handle(
        post("/map/bounds", &cookie, &[("bounds", "[[0,0],[0,0]"), ("event", "load")]),
        &app,
    );
    match res {
        Err(e) => assert_eq!(e.status(), 400),
        Ok(resp) => panic!("expected 400, got {}", resp.status()),
    }
}

#[test]
fn viewport_is_persisted_and_restored() {
    let (app, _, _) = test_app();
    let cookie = session_with_bounds(&app, PRINCETON);

    let resp = handle(
        post(
            "/map/viewport",
            &cookie,
            &[("latitude", "40.5"), ("longitude", "-74.2"), ("zoom", "19")],
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 204);

    let id = cookie.trim_start_matches("view_session=");
    let v = ViewStateStore::new(&app.db, hash_session_id(id))
        .get(KEY_VIEWPORT, Viewport::default())
        .unwrap();
    assert_eq!(
        v,
        Viewport {
            latitude: 40.5,
            longitude: -74.2,
            zoom: 15.0
        }
    );

    let body = body_string(handle(get("/", &cookie), &app).unwrap());
    assert!(body.contains(r#"data-latitude="40.5""#));
}

#[test]
fn persisted_state_survives_a_restart() {
    let (app, api, images) = test_app();
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, ELSEWHERE);

    let restarted = App::new(
        app.config.clone(),
        app.db.clone(),
        Box::new(api.clone()),
        Box::new(images.clone()),
    );
    let body = body_string(handle(get("/houses/panel", &cookie), &restarted).unwrap());
    assert_eq!(listed_ids(&body), vec!["far"]);
}

#[test]
fn query_failure_renders_error_view() {
    let (app, api, _) = test_app();
    api.fail_houses.store(true, Ordering::SeqCst);
    let cookie = session_with_bounds(&app, PRINCETON);

    let resp = handle(get("/", &cookie), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Error loading houses"));
    assert!(!body.contains(r#"id="map""#));
}

#[test]
fn popup_shows_cached_house() {
    let (app, api, _) = test_app();
    seed_princeton(&api);
    let cookie = session_with_bounds(&app, PRINCETON);
    handle(get("/houses/panel", &cookie), &app).unwrap();

    let resp = handle(get("/map/popup?id=1", &cookie), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("1 Witherspoon Street, Princet"));
    assert!(!body.contains("Princeton, New Jersey"));
    assert!(body.contains("https://img.example/200x112/houses/1"));
    assert!(body.contains(r#"width="200" height="112""#));
    assert!(body.contains(r#"href="/houses/1""#));

    match handle(get("/map/popup?id=nope", &cookie), &app) {
        Err(e) => assert_eq!(e.status(), 404),
        Ok(resp) => panic!("expected 404, got {}", resp.status()),
    }
}

#[test]
fn unknown_route_is_not_found() {
    let (app, _, _) = test_app();
    let res = handle(get("/nowhere", "x=1"), &app);
    assert!(matches!(res, Err(crate::errors::ServerError::NotFound)));
}

#[test]
fn static_assets_are_served_with_content_type() {
    let (app, _, _) = test_app();
    let resp = handle(get("/static/main.css", "x=1"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/css; charset=utf-8"
    );

    let res = handle(get("/static/missing.js", "x=1"), &app);
    assert!(matches!(res, Err(crate::errors::ServerError::NotFound)));
}

#[test]
fn healthz_and_assets_do_not_start_a_session() {
    let (app, _, _) = test_app();
    for uri in ["/healthz", "/static/home-solid.svg"] {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = handle(req, &app).unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Set-Cookie").is_none(), "{uri}");
    }
}

#[test]
fn popup_for_unknown_session_creates_nothing() {
    let (app, _, _) = test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/map/popup?id=1")
        .body(Body::empty())
        .unwrap();
    match handle(req, &app) {
        Err(e) => assert_eq!(e.status(), 404),
        Ok(resp) => panic!("expected 404, got {}", resp.status()),
    }
    assert_eq!(app.explore.session_count().unwrap(), 0);
}

#[test]
fn cookieless_visitors_do_not_accumulate() {
    let (app, _, _) = test_app_with_config(AppConfig {
        explore_idle: Duration::ZERO,
        ..AppConfig::default()
    });
    for _ in 0..50 {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/houses/panel")
            .body(Body::empty())
            .unwrap();
        handle(req, &app).unwrap();
    }
    assert_eq!(app.explore.session_count().unwrap(), 1);
}
