use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use super::api::CreatePersonBody;

const NICKNAME_MAX_CHARS: usize = 32;
const NAME_MAX_CHARS: usize = 100;
const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the `person` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Option<Value>,
}

/// A person that passed validation and is ready to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Option<Value>,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid nickname")]
    InvalidNickname,
    #[error("invalid name")]
    InvalidName,
    #[error("invalid birth_date")]
    InvalidBirthDate,
}

impl TryFrom<CreatePersonBody> for NewPerson {
    type Error = ValidationError;

    /// Checks run in order and the first failure wins.
    fn try_from(body: CreatePersonBody) -> Result<Self, Self::Error> {
        if !within_length(&body.nickname, NICKNAME_MAX_CHARS) {
            return Err(ValidationError::InvalidNickname);
        }
        if !within_length(&body.name, NAME_MAX_CHARS) {
            return Err(ValidationError::InvalidName);
        }
        let birth_date = parse_birth_date(&body.birth_date)?;

        Ok(NewPerson {
            nickname: body.nickname,
            name: body.name,
            birth_date,
            stack: body.stack,
        })
    }
}

fn within_length(value: &str, max_chars: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_chars
}

// chrono accepts single-digit fields and signed years, so the shape is pinned first.
fn parse_birth_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = raw.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(ValidationError::InvalidBirthDate);
    }

    NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT).map_err(|_| ValidationError::InvalidBirthDate)
}
