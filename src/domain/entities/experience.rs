use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{deserialize_date, deserialize_optional_date};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub sort_order: i32,
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFrontMatter {
    #[validate(length(min = 1))]
    pub company: String,

    #[validate(length(min = 1))]
    pub role: String,

    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,

    pub location: Option<String>,

    #[serde(rename = "order")]
    pub sort_order: i32,
}

impl ExperienceFrontMatter {
    pub fn into_experience(self, body: String) -> Experience {
        Experience {
            id: None,
            company: self.company,
            role: self.role,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            sort_order: self.sort_order,
            body,
        }
    }
}

impl Experience {
    /// An experience without an end date is the current one.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

/// First current experience in the given (already ordered) list.
pub fn current_experience(experiences: &[Experience]) -> Option<&Experience> {
    experiences.iter().find(|e| e.is_current())
}
