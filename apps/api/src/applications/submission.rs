use chrono::Utc;
use tracing::{error, info};

use crate::applications::repository::ApplicationRepository;
use crate::applications::uploads::{storage_name, validate_resume, ResumeStorage};
use crate::applications::validation::ApplicationForm;
use crate::errors::AppError;
use crate::models::application::{Application, NewApplication};

/// Validates the form, stores the resume, then inserts the row.
///
/// The file is written first because the row records its path. If the insert
/// fails the file is removed again; a crash between the two steps can still
/// leave an orphaned file behind.
pub async fn submit_application(
    repo: &dyn ApplicationRepository,
    storage: &ResumeStorage,
    form: &ApplicationForm,
) -> Result<Application, AppError> {
    let applicant = form.applicant_details()?;
    let (original_filename, bytes) = validate_resume(form.resume.as_ref(), storage.max_bytes())?;

    let stored_name = storage_name(Utc::now(), &applicant, original_filename);
    let path = storage
        .store(&stored_name, bytes)
        .await
        .inspect_err(|e| {
            error!(
                email = %applicant.email,
                file = %stored_name,
                "Failed to store resume: {e}"
            )
        })?;

    let new_application = NewApplication {
        applicant,
        resume_filename: original_filename.to_string(),
        resume_path: path.to_string_lossy().into_owned(),
    };

    match repo.create(&new_application).await {
        Ok(application) => {
            info!(
                "New application received: {} - {} {} (id {})",
                application.email, application.first_name, application.last_name, application.id
            );
            Ok(application)
        }
        Err(e) => {
            error!(
                email = %new_application.applicant.email,
                "Failed to create application, removing stored resume: {e}"
            );
            storage.discard(&path).await;
            Err(e)
        }
    }
}
