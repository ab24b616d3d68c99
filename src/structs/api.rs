use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::person::Person;

/// Missing or `null` fields deserialize as empty and are caught by validation.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonBody {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birth_date: String,
    #[serde(default)]
    pub stack: Option<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPersonQuery {
    #[serde(default, rename(deserialize = "t"))]
    pub search_term: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PersonBody {
    pub id: i64,
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Option<Value>,
}

impl From<Person> for PersonBody {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            nickname: person.nickname,
            name: person.name,
            birth_date: person.birth_date,
            stack: person.stack,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CountBody {
    pub count: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
