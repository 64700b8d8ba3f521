use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::application::{Application, NewApplication};
use crate::models::Pagination;

/// Persistence gateway for job applications.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, application: &NewApplication) -> Result<Application, AppError>;

    async fn list(&self, page: Pagination) -> Result<Vec<Application>, AppError>;
}

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create(&self, application: &NewApplication) -> Result<Application, AppError> {
        let mut conn = self.pool.acquire().await?;
        let applicant = &application.applicant;

        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications
                (first_name, last_name, email, phone, linkedin_url,
                 resume_filename, resume_path, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&applicant.first_name)
        .bind(&applicant.last_name)
        .bind(&applicant.email)
        .bind(&applicant.phone)
        .bind(&applicant.linkedin_url)
        .bind(&application.resume_filename)
        .bind(&application.resume_path)
        .bind(&applicant.note)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Application>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let (limit, offset) = page.sql_bounds();

        let rows = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }
}
