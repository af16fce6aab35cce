use crate::domain::error::{DomainError, non_blank};
use crate::domain::input::{IntegerInput, integer_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTENSITY: i64 = 5;
pub const RECENT_LOG_LIMIT: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomLog {
    pub id: i64,
    pub user_id: i64,
    pub log_date: String,
    pub symptoms: Vec<String>,
    pub intensity: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSymptomLog {
    pub log_date: String,
    pub symptoms: Vec<String>,
    pub intensity: i64,
    pub notes: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateSymptomLogRequest {
    #[serde(default)]
    pub log_date: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub intensity: Option<IntegerInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateSymptomLogRequest {
    pub fn validate(self) -> Result<NewSymptomLog, DomainError> {
        let log_date = non_blank(self.log_date)
            .ok_or_else(|| DomainError::Validation("log_date required".to_string()))?;
        let intensity = integer_field(self.intensity, "intensity")?.unwrap_or(DEFAULT_INTENSITY);

        Ok(NewSymptomLog {
            log_date,
            symptoms: normalize_tags(self.symptoms.unwrap_or_default()),
            intensity,
            notes: non_blank(self.notes).unwrap_or_default(),
        })
    }
}

/// Trims tags, drops empty ones and keeps the first occurrence of duplicates.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
