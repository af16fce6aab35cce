use crate::data::sqlite::{SqliteStore, is_unique_violation};
use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument, trace};

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[async_trait]
impl UserRepository for SqliteStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.with_conn(move |conn| {
            let created_at = Utc::now();
            trace!(email = %user.email, "Inserting user row");
            let inserted = conn.execute(
                "INSERT INTO users (email, password_hash, name, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![user.email, user.password_hash, user.name, created_at],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    debug!(email = %user.email, "Email already present");
                    return Err(DomainError::Conflict("Email already registered".to_string()).into());
                }
                Err(e) => return Err(e.into()),
            }
            let id = conn.last_insert_rowid();
            debug!(user_id = id, email = %user.email, "User saved");
            Ok(User {
                id,
                email: user.email,
                password_hash: user.password_hash,
                name: user.name,
                created_at,
            })
        })
        .await
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                    params![email],
                    user_from_row,
                )
                .optional()?;
            match &user {
                Some(u) => debug!(user_id = u.id, "User found by email"),
                None => trace!(email = %email, "No user with this email"),
            }
            Ok(user)
        })
        .await
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id],
                    user_from_row,
                )
                .optional()?;
            if user.is_none() {
                trace!(user_id = id, "User not found");
            }
            Ok(user)
        })
        .await
    }
}
