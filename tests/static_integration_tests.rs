#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use common::static_site;
use serde_json::{Value, json};
use std::fs;

#[actix_web::test]
async fn test_index_is_served_at_root() {
    let site = static_site();
    let app = setup_app!(site.path());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "text/html");
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"<h1>Eraya</h1>");
}

#[actix_web::test]
async fn test_html_suffix_fallback() {
    let site = static_site();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/symptoms").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(&body[..], b"<h1>Symptoms</h1>");
}

#[actix_web::test]
async fn test_literal_asset() {
    let site = static_site();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/script.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.contains("javascript"));
}

#[actix_web::test]
async fn test_missing_asset_is_not_found() {
    let site = static_site();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/nowhere.png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_favicon_absent_is_no_content() {
    let site = static_site();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/favicon.ico").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_favicon_present_is_served() {
    let site = static_site();
    fs::write(site.path().join("favicon.ico"), [0u8, 0, 1, 0]).unwrap();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/favicon.ico").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], &[0u8, 0, 1, 0]);
}

#[actix_web::test]
async fn test_unknown_api_paths_are_json_not_found() {
    let site = static_site();
    let app = setup_app!(site.path());

    let requests = [
        test::TestRequest::get().uri("/api/unknown").to_request(),
        test::TestRequest::get().uri("/api/appointments/7").to_request(),
        test::TestRequest::post().uri("/api/nothing/here").to_request(),
    ];
    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Not found" }));
    }
}

#[actix_web::test]
async fn test_health_check() {
    let site = static_site();
    let app = setup_app!(site.path());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
