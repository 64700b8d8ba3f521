use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact-form submission, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub phone: Option<String>,
    pub project_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated lead ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub phone: Option<String>,
    pub project_description: String,
}
