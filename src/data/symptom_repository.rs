use crate::data::sqlite::SqliteStore;
use crate::domain::repository::SymptomLogRepository;
use crate::domain::symptom::{NewSymptomLog, SymptomLog};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument, trace};

const SYMPTOMS_COLUMN: usize = 3;

fn symptom_log_from_row(row: &Row<'_>) -> rusqlite::Result<SymptomLog> {
    let raw: String = row.get(SYMPTOMS_COLUMN)?;
    let symptoms = serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(SYMPTOMS_COLUMN, Type::Text, Box::new(e))
    })?;
    Ok(SymptomLog {
        id: row.get(0)?,
        user_id: row.get(1)?,
        log_date: row.get(2)?,
        symptoms,
        intensity: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const LOG_COLUMNS: &str =
    "id, user_id, log_date, symptoms, intensity, notes, created_at, updated_at";

#[async_trait]
impl SymptomLogRepository for SqliteStore {
    #[instrument(skip(self, log), fields(log_date = %log.log_date))]
    async fn upsert_symptom_log(&self, user_id: i64, log: NewSymptomLog) -> Result<i64> {
        let symptoms = serde_json::to_string(&log.symptoms)?;
        self.with_conn(move |conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO symptom_logs (user_id, log_date, symptoms, intensity, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 ON CONFLICT (user_id, log_date) DO UPDATE SET
                    symptoms = excluded.symptoms,
                    intensity = excluded.intensity,
                    notes = excluded.notes,
                    updated_at = excluded.updated_at",
                params![user_id, log.log_date, symptoms, log.intensity, log.notes, now],
            )?;
            let id: i64 = conn.query_row(
                "SELECT id FROM symptom_logs WHERE user_id = ?1 AND log_date = ?2",
                params![user_id, log.log_date],
                |row| row.get(0),
            )?;
            debug!(log_id = id, user_id = user_id, "Symptom log saved");
            Ok(id)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_symptom_log(&self, user_id: i64, log_date: &str) -> Result<Option<SymptomLog>> {
        let log_date = log_date.to_string();
        self.with_conn(move |conn| {
            let log = conn
                .query_row(
                    &format!(
                        "SELECT {LOG_COLUMNS} FROM symptom_logs WHERE user_id = ?1 AND log_date = ?2"
                    ),
                    params![user_id, log_date],
                    symptom_log_from_row,
                )
                .optional()?;
            trace!(found = log.is_some(), "Symptom log lookup by date");
            Ok(log)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_recent_symptom_logs(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<SymptomLog>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {LOG_COLUMNS} FROM symptom_logs WHERE user_id = ?1
                 ORDER BY log_date DESC, id DESC LIMIT ?2"
            ))?;
            let logs = stmt
                .query_map(params![user_id, limit], symptom_log_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            debug!(user_id = user_id, count = logs.len(), "Recent symptom logs loaded");
            Ok(logs)
        })
        .await
    }
}
