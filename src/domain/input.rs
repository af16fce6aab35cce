use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// An integer field as browsers send it: a JSON number, or text when the
/// value comes straight from a form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Number(i64),
    Fraction(f64),
    Text(String),
}

impl IntegerInput {
    /// Blank text counts as absent. Fractions truncate toward zero.
    pub fn resolve(self, field: &str) -> Result<Option<i64>, DomainError> {
        match self {
            Self::Number(n) => Ok(Some(n)),
            Self::Fraction(f) if f.is_finite() => Ok(Some(f.trunc() as i64)),
            Self::Fraction(_) => Err(not_a_whole_number(field)),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse()
                    .map(Some)
                    .map_err(|_| not_a_whole_number(field))
            }
        }
    }
}

/// Resolves an optional integer field, treating missing and blank alike.
pub fn integer_field(value: Option<IntegerInput>, field: &str) -> Result<Option<i64>, DomainError> {
    value.map_or(Ok(None), |v| v.resolve(field))
}

fn not_a_whole_number(field: &str) -> DomainError {
    DomainError::Validation(format!("{field} must be a whole number"))
}
