use crate::domain::error::{DomainError, non_blank};
use crate::domain::input::{IntegerInput, integer_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Validated appointment fields, ready to be stored for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub doctor_id: Option<IntegerInput>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn validate(self) -> Result<NewAppointment, DomainError> {
        let required = (
            non_blank(self.doctor_name),
            non_blank(self.preferred_date),
            non_blank(self.preferred_time),
            non_blank(self.patient_name),
            non_blank(self.patient_phone),
        );
        let (
            Some(doctor_name),
            Some(preferred_date),
            Some(preferred_time),
            Some(patient_name),
            Some(patient_phone),
        ) = required
        else {
            return Err(DomainError::Validation("Missing required fields".to_string()));
        };
        let doctor_id = integer_field(self.doctor_id, "doctor_id")?.unwrap_or(0);

        Ok(NewAppointment {
            doctor_id,
            doctor_name,
            preferred_date,
            preferred_time,
            patient_name,
            patient_phone,
            reason: non_blank(self.reason).unwrap_or_default(),
        })
    }
}
