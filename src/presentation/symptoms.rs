use crate::domain::error::non_blank;
use crate::domain::symptom::{CreateSymptomLogRequest, SymptomLog};
use crate::presentation::appointments::CreatedResponse;
use crate::presentation::error::ApiError;
use crate::presentation::routes::AppState;
use crate::presentation::session::CurrentUser;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
pub struct SymptomQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleLog {
    pub log: Option<SymptomLog>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentLogs {
    pub logs: Vec<SymptomLog>,
}

/// `?date=` selects one day's log; without it the recent history is returned.
#[instrument(skip(state))]
pub async fn list_symptoms(
    state: web::Data<AppState>,
    CurrentUser(user_id): CurrentUser,
    query: web::Query<SymptomQuery>,
) -> Result<HttpResponse, ApiError> {
    match non_blank(query.into_inner().date) {
        Some(date) => {
            let log = state.symptom_service.log_for_date(user_id, &date).await?;
            debug!(date = %date, found = log.is_some(), "Symptom log lookup");
            Ok(HttpResponse::Ok().json(SingleLog { log }))
        }
        None => {
            let logs = state.symptom_service.recent_logs(user_id).await?;
            Ok(HttpResponse::Ok().json(RecentLogs { logs }))
        }
    }
}

#[instrument(skip(state, req))]
pub async fn create_symptom_log(
    state: web::Data<AppState>,
    CurrentUser(user_id): CurrentUser,
    req: web::Json<CreateSymptomLogRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = state.symptom_service.save_log(user_id, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CreatedResponse {
        id,
        message: "Symptoms saved".to_string(),
    }))
}
