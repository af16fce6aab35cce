#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use eraya::presentation::session::SESSION_COOKIE;
use std::fs;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-key-for-integration-tests";

/// Builds the full application over an in-memory store and the given static root.
macro_rules! setup_app {
    ($static_dir:expr) => {{
        use actix_web::{App, test, web};
        use eraya::data::sqlite::SqliteStore;
        use eraya::presentation::assets::{StaticAssets, not_found};
        use eraya::presentation::routes::{AppState, configure};
        use eraya::presentation::session::{SessionKeys, SessionMiddleware};
        use std::sync::Arc;

        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let sessions = Arc::new(SessionKeys::new(common::TEST_SECRET, 3600, false));
        let assets = StaticAssets::new($static_dir).unwrap();
        let state = web::Data::new(AppState::new(store, Arc::clone(&sessions), assets));

        test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(SessionMiddleware::new(sessions))
                .configure(configure)
                .default_service(web::to(not_found)),
        )
        .await
    }};
}

/// A static root with the pages the front end ships.
pub fn static_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>Eraya</h1>").unwrap();
    fs::write(dir.path().join("symptoms.html"), "<h1>Symptoms</h1>").unwrap();
    fs::write(dir.path().join("script.js"), "console.log('eraya');").unwrap();
    dir
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}
