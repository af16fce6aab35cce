use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::symptom::{NewSymptomLog, SymptomLog};
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DomainError::Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create_appointment(&self, user_id: i64, appointment: NewAppointment) -> Result<i64>;
    /// Newest first.
    async fn list_appointments_by_user(&self, user_id: i64) -> Result<Vec<Appointment>>;
}

#[async_trait]
pub trait SymptomLogRepository: Send + Sync {
    /// Inserts the log, or replaces the user's existing log for the same date.
    async fn upsert_symptom_log(&self, user_id: i64, log: NewSymptomLog) -> Result<i64>;
    async fn find_symptom_log(&self, user_id: i64, log_date: &str) -> Result<Option<SymptomLog>>;
    /// Most recent `log_date` first.
    async fn list_recent_symptom_logs(&self, user_id: i64, limit: usize)
    -> Result<Vec<SymptomLog>>;
}
