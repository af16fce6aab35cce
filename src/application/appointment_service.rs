use crate::domain::appointment::{Appointment, CreateAppointmentRequest};
use crate::domain::repository::AppointmentRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct AppointmentService<R: AppointmentRepository> {
    repository: Arc<R>,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Appointment>> {
        self.repository.list_appointments_by_user(user_id).await
    }

    /// Validates and stores a booking request, returning the new id.
    #[instrument(skip(self, req))]
    pub async fn request_appointment(
        &self,
        user_id: i64,
        req: CreateAppointmentRequest,
    ) -> Result<i64> {
        let appointment = req.validate()?;
        let doctor_id = appointment.doctor_id;
        let id = self.repository.create_appointment(user_id, appointment).await?;
        info!(appointment_id = id, doctor_id = doctor_id, "Appointment requested");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteStore;
    use crate::domain::input::IntegerInput;
    use crate::domain::error::DomainError;
    use crate::domain::repository::UserRepository;
    use crate::domain::user::NewUser;

    async fn setup() -> (AppointmentService<SqliteStore>, i64) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let user = store
            .create_user(NewUser {
                email: "booker@example.com".to_string(),
                password_hash: "hash".to_string(),
                name: "Booker".to_string(),
            })
            .await
            .unwrap();
        (AppointmentService::new(store), user.id)
    }

    #[tokio::test]
    async fn test_request_appointment_persists() {
        let (service, user_id) = setup().await;
        let req = CreateAppointmentRequest {
            doctor_id: Some(IntegerInput::Number(2)),
            doctor_name: Some("Dr. Iyer".to_string()),
            preferred_date: Some("2026-12-01".to_string()),
            preferred_time: Some("14:00".to_string()),
            patient_name: Some("Nia".to_string()),
            patient_phone: Some("555-0199".to_string()),
            reason: Some("Irregular cycle".to_string()),
        };

        let id = service.request_appointment(user_id, req).await.unwrap();

        let listed = service.list_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].reason, "Irregular cycle");
    }

    #[tokio::test]
    async fn test_invalid_request_stores_nothing() {
        let (service, user_id) = setup().await;
        let req = CreateAppointmentRequest {
            doctor_name: Some("Dr. Iyer".to_string()),
            ..Default::default()
        };

        let err = service.request_appointment(user_id, req).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
        assert!(service.list_for_user(user_id).await.unwrap().is_empty());
    }
}
