//! Page content with at most one live instance: "now", "about" and "uses".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::deserialize_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NowContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub last_updated: NaiveDate,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AboutContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub current_role: String,
    pub current_company: String,
    pub location: String,
    pub focus_areas: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UsesContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub body: String,
}

// ───── Front Matter ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NowFrontMatter {
    #[validate(length(min = 1))]
    pub title: String,

    #[serde(deserialize_with = "deserialize_date")]
    pub last_updated: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutFrontMatter {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub current_role: String,
    pub current_company: String,
    pub location: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UsesFrontMatter {
    #[validate(length(min = 1))]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    #[serde(flatten)]
    pub page: T,
    pub content_html: String,
}

impl NowFrontMatter {
    pub fn into_content(self, body: String) -> NowContent {
        NowContent {
            id: None,
            title: self.title,
            last_updated: self.last_updated,
            body,
        }
    }
}

impl AboutFrontMatter {
    pub fn into_content(self, body: String) -> AboutContent {
        AboutContent {
            id: None,
            title: self.title,
            description: self.description,
            current_role: self.current_role,
            current_company: self.current_company,
            location: self.location,
            focus_areas: self.focus_areas,
            body,
        }
    }
}

impl UsesFrontMatter {
    pub fn into_content(self, body: String) -> UsesContent {
        UsesContent {
            id: None,
            title: self.title,
            body,
        }
    }
}
