use crate::domain::appointment::{Appointment, CreateAppointmentRequest};
use crate::presentation::error::ApiError;
use crate::presentation::routes::AppState;
use crate::presentation::session::CurrentUser;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentList {
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[instrument(skip(state))]
pub async fn list_appointments(
    state: web::Data<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let appointments = state.appointment_service.list_for_user(user_id).await?;
    info!(count = appointments.len(), "Appointments listed");
    Ok(HttpResponse::Ok().json(AppointmentList { appointments }))
}

#[instrument(skip(state, req))]
pub async fn create_appointment(
    state: web::Data<AppState>,
    CurrentUser(user_id): CurrentUser,
    req: web::Json<CreateAppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = state
        .appointment_service
        .request_appointment(user_id, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CreatedResponse {
        id,
        message: "Appointment requested successfully".to_string(),
    }))
}
