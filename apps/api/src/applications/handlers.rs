use axum::{
    extract::{multipart::Field, rejection::QueryRejection, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::BytesMut;
use tracing::error;

use crate::applications::submission::submit_application;
use crate::applications::uploads::{check_filename, check_size};
use crate::applications::validation::{ApplicationForm, ResumeUpload};
use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::Pagination;
use crate::state::AppState;

/// POST /api/v1/applications
///
/// Multipart form: first_name, last_name, email, phone, resume (file),
/// linkedin_url?, note?
pub async fn handle_create_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let form = read_application_form(multipart, state.resumes.max_bytes()).await?;
    let application =
        submit_application(state.applications.as_ref(), &state.resumes, &form).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications
///
/// Unauthenticated, and `limit` is not capped.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Application>>, AppError> {
    let Query(page) = page?;
    let applications = state.applications.list(page).await.inspect_err(|e| {
        error!(skip = page.skip, limit = page.limit, "Failed to fetch applications: {e}")
    })?;
    Ok(Json(applications))
}

/// Collects the form parts. The resume's type is checked as soon as its part
/// starts and its size while it streams, so a bad upload is never buffered in
/// full.
async fn read_application_form(
    mut multipart: Multipart,
    max_resume_bytes: usize,
) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "first_name" => form.first_name = Some(read_text(field).await?),
            "last_name" => form.last_name = Some(read_text(field).await?),
            "email" => form.email = Some(read_text(field).await?),
            "phone" => form.phone = Some(read_text(field).await?),
            "linkedin_url" => form.linkedin_url = Some(read_text(field).await?),
            "note" => form.note = Some(read_text(field).await?),
            "resume" => form.resume = Some(read_resume(field, max_resume_bytes).await?),
            _ => {
                // drain
                field.bytes().await.map_err(malformed)?;
            }
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(malformed)
}

async fn read_resume(mut field: Field<'_>, max_bytes: usize) -> Result<ResumeUpload, AppError> {
    let filename = field.file_name().map(str::to_string);
    check_filename(filename.as_deref())?;

    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        check_size(buf.len() + chunk.len(), max_bytes)?;
        buf.extend_from_slice(&chunk);
    }

    Ok(ResumeUpload {
        filename,
        bytes: buf.freeze(),
    })
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {}", e.body_text()))
}
