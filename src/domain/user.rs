use crate::domain::error::{DomainError, non_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The shape of a user that is safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Row data for a user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

const CREDENTIALS_REQUIRED: &str = "Email and password required";

fn required_password(password: Option<String>) -> Option<String> {
    password.filter(|p| !p.is_empty())
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, DomainError> {
        let (Some(email), Some(password)) = (non_blank(self.email), required_password(self.password))
        else {
            return Err(DomainError::Validation(CREDENTIALS_REQUIRED.to_string()));
        };
        let name = non_blank(self.name).unwrap_or_else(|| display_name_from_email(&email));
        Ok(Registration {
            email,
            password,
            name,
        })
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, DomainError> {
        match (non_blank(self.email), required_password(self.password)) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(DomainError::Validation(CREDENTIALS_REQUIRED.to_string())),
        }
    }
}

/// Local part of an address, e.g. `alice` for `alice@example.com`.
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_derives_name_from_email() {
        let req = RegisterRequest {
            email: Some("luna@example.com".to_string()),
            password: Some("secret".to_string()),
            name: Some("   ".to_string()),
        };
        let registration = req.validate().unwrap();
        assert_eq!(registration.name, "luna");
    }

    #[test]
    fn test_register_keeps_explicit_name_trimmed() {
        let req = RegisterRequest {
            email: Some("luna@example.com".to_string()),
            password: Some("secret".to_string()),
            name: Some("  Luna Lovegood ".to_string()),
        };
        assert_eq!(req.validate().unwrap().name, "Luna Lovegood");
    }

    #[test]
    fn test_register_requires_email_and_password() {
        let missing_password = RegisterRequest {
            email: Some("luna@example.com".to_string()),
            ..Default::default()
        };
        let err = missing_password.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == CREDENTIALS_REQUIRED));

        let missing_email = RegisterRequest {
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(missing_email.validate().is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req = LoginRequest {
            email: Some("  ".to_string()),
            password: Some("secret".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_trims_email_but_not_password() {
        let req = LoginRequest {
            email: Some(" luna@example.com ".to_string()),
            password: Some(" pass ".to_string()),
        };
        let credentials = req.validate().unwrap();
        assert_eq!(credentials.email, "luna@example.com");
        assert_eq!(credentials.password, " pass ");
    }

    #[test]
    fn test_display_name_without_at_sign() {
        assert_eq!(display_name_from_email("plainname"), "plainname");
    }
}
