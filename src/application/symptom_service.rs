use crate::domain::repository::SymptomLogRepository;
use crate::domain::symptom::{CreateSymptomLogRequest, RECENT_LOG_LIMIT, SymptomLog};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct SymptomService<R: SymptomLogRepository> {
    repository: Arc<R>,
}

impl<R: SymptomLogRepository> SymptomService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn log_for_date(&self, user_id: i64, log_date: &str) -> Result<Option<SymptomLog>> {
        self.repository.find_symptom_log(user_id, log_date).await
    }

    pub async fn recent_logs(&self, user_id: i64) -> Result<Vec<SymptomLog>> {
        self.repository
            .list_recent_symptom_logs(user_id, RECENT_LOG_LIMIT)
            .await
    }

    /// Saves the day's log. A second save for the same date overwrites the
    /// first and keeps its id.
    #[instrument(skip(self, req))]
    pub async fn save_log(&self, user_id: i64, req: CreateSymptomLogRequest) -> Result<i64> {
        let log = req.validate()?;
        let log_date = log.log_date.clone();
        let id = self.repository.upsert_symptom_log(user_id, log).await?;
        info!(log_id = id, log_date = %log_date, "Symptom log saved");
        Ok(id)
    }
}
