use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored job application. `resume_path` stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: Option<String>,
    pub resume_filename: String,
    #[serde(skip_serializing, default)]
    pub resume_path: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated applicant details, before the resume has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: Option<String>,
    pub note: Option<String>,
}

/// An application ready for insertion: applicant details plus the stored resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub applicant: ApplicantDetails,
    pub resume_filename: String,
    pub resume_path: String,
}
