// src/tests/router_tests/house_form_tests.rs
use crate::router::handle;
use crate::session::{generate_session_id, COOKIE_NAME};
use crate::tests::utils::{body_string, form_body, house, test_app};
use astra::Body;
use http::{Method, Request};
use scraper::{Html, Selector};
use std::sync::atomic::Ordering;

const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn submit(pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/houses/new")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body(pairs))
        .unwrap()
}

fn valid_form(bedrooms: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("address", "20 Nassau St, Princeton, NJ"),
        ("latitude", "40.3503"),
        ("longitude", "-74.6593"),
        ("bedrooms", bedrooms),
        ("image", PNG),
    ]
}

#[test]
fn form_page_loads_with_fields_hidden_until_address() {
    let (app, _, _) = test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/houses/new")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Add a new house"));

    let doc = Html::parse_document(&body);
    let after = doc
        .select(&Selector::parse("#after-address").unwrap())
        .next()
        .unwrap();
    assert!(after.value().attr("hidden").is_some());
}

#[test]
fn too_many_bedrooms_is_rejected_inline() {
    let (app, api, _) = test_app();

    let resp = handle(submit(&valid_form("11")), &app).unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("Wooahh, too big of a house"));
    // Entered values survive the round trip.
    assert!(body.contains("20 Nassau St, Princeton, NJ"));
    assert!(api.created.lock().unwrap().is_empty());
}

#[test]
fn zero_bedrooms_is_rejected() {
    let (app, _, _) = test_app();
    let body = body_string(handle(submit(&valid_form("0")), &app).unwrap());
    assert!(body.contains("Must have at least 1 bedroom"));
}

#[test]
fn missing_address_keeps_rest_of_form_hidden() {
    let (app, _, _) = test_app();
    let resp = handle(submit(&[("bedrooms", "3")]), &app).unwrap();
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("Please enter your address"));
}

#[test]
fn valid_submission_uploads_then_creates_and_redirects() {
    let (app, api, _) = test_app();

    let resp = handle(submit(&valid_form("5")), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("Location").and_then(|v| v.to_str().ok()),
        Some("/houses/new-1")
    );

    let created = api.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].image, "https://img.example/upload/house.jpg");
    assert_eq!(created[0].bedrooms, 5);
    assert_eq!(created[0].coordinates.latitude, 40.3503);
}

#[test]
fn upload_failure_shows_error_and_creates_nothing() {
    let (app, api, images) = test_app();
    images.fail.store(true, Ordering::SeqCst);

    let resp = handle(submit(&valid_form("3")), &app).unwrap();
    assert_eq!(resp.status(), 502);
    assert!(resp.headers().get("Location").is_none());

    let body = body_string(resp);
    assert!(body.contains("Uploading the image failed"));
    assert!(api.created.lock().unwrap().is_empty());
}

#[test]
fn creating_a_house_refreshes_open_maps() {
    let (app, api, _) = test_app();
    let cookie = format!("{COOKIE_NAME}={}", generate_session_id());
    let panel = || {
        Request::builder()
            .method(Method::GET)
            .uri("/houses/panel")
            .header("Cookie", cookie.as_str())
            .body(Body::empty())
            .unwrap()
    };

    handle(panel(), &app).unwrap();
    handle(panel(), &app).unwrap();
    assert_eq!(api.queries.load(Ordering::SeqCst), 1);

    api.houses.lock().unwrap().push(house("0", 0.0, 0.0));
    handle(submit(&valid_form("2")), &app).unwrap();

    let body = body_string(handle(panel(), &app).unwrap());
    assert_eq!(api.queries.load(Ordering::SeqCst), 2);
    assert!(body.contains(r#"data-id="0""#));
}

#[test]
fn create_failure_shows_banner_without_redirect() {
    let (app, api, _) = test_app();
    api.fail_create.store(true, Ordering::SeqCst);

    let resp = handle(submit(&valid_form("4")), &app).unwrap();
    assert_eq!(resp.status(), 502);
    assert!(resp.headers().get("Location").is_none());

    let body = body_string(resp);
    let doc = Html::parse_document(&body);
    let banner = doc
        .select(&Selector::parse(".form-error").unwrap())
        .next()
        .expect("failure banner");
    assert_eq!(
        banner.text().collect::<String>(),
        "Saving the house failed. Please try again."
    );
    // Entered values are kept for another try.
    assert!(body.contains("20 Nassau St, Princeton, NJ"));
}

#[test]
fn signature_failure_stops_before_upload() {
    let (app, api, _) = test_app();
    api.fail_signature.store(true, Ordering::SeqCst);

    let resp = handle(submit(&valid_form("4")), &app).unwrap();
    assert_eq!(resp.status(), 502);
    assert!(resp.headers().get("Location").is_none());
    assert!(body_string(resp).contains("prepare the image upload"));
    assert!(api.created.lock().unwrap().is_empty());
}

#[test]
fn rerender_reveals_details_once_address_is_chosen() {
    let (app, _, _) = test_app();
    let resp = handle(
        submit(&[
            ("address", "20 Nassau St, Princeton, NJ"),
            ("latitude", "40.3503"),
            ("longitude", "-74.6593"),
            ("bedrooms", "3"),
        ]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("Please upload one file"));

    let doc = Html::parse_document(&body);
    let after = doc
        .select(&Selector::parse("#after-address").unwrap())
        .next()
        .unwrap();
    assert!(after.value().attr("hidden").is_none());
    let preview = doc
        .select(&Selector::parse("#preview").unwrap())
        .next()
        .unwrap();
    assert!(preview.value().attr("hidden").is_some());
}

#[test]
fn rerender_with_attached_image_shows_preview() {
    let (app, _, _) = test_app();
    let body = body_string(handle(submit(&valid_form("12")), &app).unwrap());

    let doc = Html::parse_document(&body);
    let preview = doc
        .select(&Selector::parse("#preview").unwrap())
        .next()
        .unwrap();
    assert!(preview.value().attr("hidden").is_none());
    assert_eq!(preview.value().attr("src"), Some(PNG));
}
