use crate::application::appointment_service::AppointmentService;
use crate::application::auth_service::AuthService;
use crate::application::symptom_service::SymptomService;
use crate::data::sqlite::SqliteStore;
use crate::presentation::appointments::{create_appointment, list_appointments};
use crate::presentation::assets::{self, StaticAssets};
use crate::presentation::auth::{login, logout, me, register};
use crate::presentation::error::ApiError;
use crate::presentation::session::{RequireLogin, SessionKeys};
use crate::presentation::symptoms::{create_symptom_log, list_symptoms};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct AppState {
    pub auth_service: AuthService<SqliteStore>,
    pub appointment_service: AppointmentService<SqliteStore>,
    pub symptom_service: SymptomService<SqliteStore>,
    pub sessions: Arc<SessionKeys>,
    pub assets: StaticAssets,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, sessions: Arc<SessionKeys>, assets: StaticAssets) -> Self {
        Self {
            auth_service: AuthService::new(Arc::clone(&store)),
            appointment_service: AppointmentService::new(Arc::clone(&store)),
            symptom_service: SymptomService::new(store),
            sessions,
            assets,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Malformed bodies and query strings use the same envelope as every other error.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected JSON body");
        ApiError::Validation("Invalid JSON body".to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected query string");
        ApiError::Validation("Invalid query string".to_string()).into()
    }));
}

/// Registers every route. The app-level default service is left to the
/// caller: `App::default_service(web::to(assets::not_found))`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me))
            .service(
                web::resource("/appointments")
                    .wrap(RequireLogin)
                    .route(web::get().to(list_appointments))
                    .route(web::post().to(create_appointment)),
            )
            .service(
                web::resource("/symptoms")
                    .wrap(RequireLogin)
                    .route(web::get().to(list_symptoms))
                    .route(web::post().to(create_symptom_log)),
            )
            .default_service(web::to(assets::not_found)),
    )
    .route("/", web::get().to(assets::index))
    .route("/favicon.ico", web::get().to(assets::favicon))
    .route("/{path:.*}", web::get().to(assets::serve));
}
