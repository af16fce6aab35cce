use crate::domain::user::{LoginRequest, PublicUser, RegisterRequest};
use crate::presentation::error::ApiError;
use crate::presentation::routes::AppState;
use crate::presentation::session::Session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: Option<PublicUser>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

#[instrument(skip(state, req))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let registration = req.into_inner().validate()?;
    info!(email = %registration.email, "Registration request received");

    let user = state.auth_service.register_user(registration).await?;
    let cookie = state.sessions.establish(user.id)?;

    Ok(HttpResponse::Ok().cookie(cookie).json(UserResponse {
        user: Some(user.into()),
    }))
}

#[instrument(skip(state, req))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let credentials = req.into_inner().validate()?;
    info!(email = %credentials.email, "Login request received");

    let user = state.auth_service.login(credentials).await?;
    let cookie = state.sessions.establish(user.id)?;

    Ok(HttpResponse::Ok().cookie(cookie).json(UserResponse {
        user: Some(user.into()),
    }))
}

#[instrument(skip(state))]
pub async fn logout(state: web::Data<AppState>, session: Session) -> HttpResponse {
    if let Some(user_id) = session.user_id() {
        info!(user_id = user_id, "Logging out");
    }
    HttpResponse::Ok()
        .cookie(state.sessions.clear())
        .json(LogoutResponse { ok: true })
}

/// Never fails: lookup problems are logged and reported as "no user".
#[instrument(skip(state))]
pub async fn me(state: web::Data<AppState>, session: Session) -> HttpResponse {
    let user = match session.user_id() {
        Some(user_id) => state
            .auth_service
            .current_user(user_id)
            .await
            .unwrap_or_else(|e| {
                error!(user_id = user_id, error = %e, "Failed to load session user");
                None
            }),
        None => None,
    };

    HttpResponse::Ok().json(UserResponse {
        user: user.map(PublicUser::from),
    })
}
