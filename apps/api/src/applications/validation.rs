use bytes::Bytes;

use crate::models::application::ApplicantDetails;
use crate::validation::{
    check_length, email, optional_free_text, optional_text, require, required_text,
    ValidationError,
};

const MAX_NAME_LEN: usize = 100;
const MIN_PHONE_LEN: usize = 10;
const MAX_PHONE_LEN: usize = 50;
const MAX_LINKEDIN_LEN: usize = 500;

/// A resume file as received in the multipart body.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

/// Raw multipart fields. Required text fields are `Option` so a missing part
/// can be reported against its own name.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub note: Option<String>,
    pub resume: Option<ResumeUpload>,
}

impl ApplicationForm {
    pub fn applicant_details(&self) -> Result<ApplicantDetails, ValidationError> {
        let first_name = required_text(
            "first_name",
            require("first_name", &self.first_name)?,
            2,
            MAX_NAME_LEN,
        )?;
        let last_name = required_text(
            "last_name",
            require("last_name", &self.last_name)?,
            2,
            MAX_NAME_LEN,
        )?;
        let email = email("email", require("email", &self.email)?)?;

        let phone = require("phone", &self.phone)?.trim();
        check_length("phone", phone, MIN_PHONE_LEN, MAX_PHONE_LEN)?;

        let linkedin_url = optional_text(
            "linkedin_url",
            self.linkedin_url.as_deref(),
            MAX_LINKEDIN_LEN,
        )?;
        let note = optional_free_text(self.note.as_deref());

        Ok(ApplicantDetails {
            first_name,
            last_name,
            email,
            phone: phone.to_string(),
            linkedin_url,
            note,
        })
    }
}
