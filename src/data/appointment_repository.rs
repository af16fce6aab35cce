use crate::data::sqlite::SqliteStore;
use crate::domain::appointment::{Appointment, NewAppointment};
use crate::domain::repository::AppointmentRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Row, params};
use tracing::{debug, instrument};

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        doctor_id: row.get("doctor_id")?,
        doctor_name: row.get("doctor_name")?,
        preferred_date: row.get("preferred_date")?,
        preferred_time: row.get("preferred_time")?,
        patient_name: row.get("patient_name")?,
        patient_phone: row.get("patient_phone")?,
        reason: row.get("reason")?,
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl AppointmentRepository for SqliteStore {
    #[instrument(skip(self, appointment), fields(doctor_id = appointment.doctor_id))]
    async fn create_appointment(&self, user_id: i64, appointment: NewAppointment) -> Result<i64> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO appointments (
                    user_id, doctor_id, doctor_name, preferred_date, preferred_time,
                    patient_name, patient_phone, reason, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    user_id,
                    appointment.doctor_id,
                    appointment.doctor_name,
                    appointment.preferred_date,
                    appointment.preferred_time,
                    appointment.patient_name,
                    appointment.patient_phone,
                    appointment.reason,
                    Utc::now(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            debug!(appointment_id = id, user_id = user_id, "Appointment saved");
            Ok(id)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_appointments_by_user(&self, user_id: i64) -> Result<Vec<Appointment>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT * FROM appointments WHERE user_id = ?1 ORDER BY id DESC",
            )?;
            let rows = stmt
                .query_map(params![user_id], appointment_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            debug!(user_id = user_id, count = rows.len(), "Appointments loaded");
            Ok(rows)
        })
        .await
    }
}
