use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::models::lead::NewLead;
use crate::validation::{
    check_length, email, optional_text, require, required_text, ValidationError,
};

const MAX_TEXT_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 50;
const MIN_DESCRIPTION_LEN: usize = 10;
const MAX_DESCRIPTION_LEN: usize = 5000;

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{7,14}$").expect("phone pattern is valid"));

/// Raw contact-form body as posted by the client. Absent keys deserialize to
/// `None` and are reported by [`LeadSubmission::validate`] under their name.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub project_description: Option<String>,
}

impl LeadSubmission {
    pub fn validate(self) -> Result<NewLead, ValidationError> {
        let name = required_text("name", require("name", &self.name)?, 2, MAX_TEXT_LEN)?;
        let email = email("email", require("email", &self.email)?)?;
        let company = required_text(
            "company",
            require("company", &self.company)?,
            2,
            MAX_TEXT_LEN,
        )?;
        let job_title = required_text(
            "job_title",
            require("job_title", &self.job_title)?,
            2,
            MAX_TEXT_LEN,
        )?;
        let phone = validate_phone(self.phone.as_deref())?;

        let project_description = require("project_description", &self.project_description)?;
        check_length(
            "project_description",
            project_description,
            MIN_DESCRIPTION_LEN,
            MAX_DESCRIPTION_LEN,
        )?;

        Ok(NewLead {
            name,
            email,
            company,
            job_title,
            phone,
            project_description: project_description.to_string(),
        })
    }
}

/// Optional international number. Separators are ignored for the format check
/// but the submitted text is what gets stored.
pub fn validate_phone(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(phone) = optional_text("phone", value, MAX_PHONE_LEN)? else {
        return Ok(None);
    };

    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    if !PHONE.is_match(&digits) {
        return Err(ValidationError::new("phone", "Invalid phone number format"));
    }

    Ok(Some(phone))
}
