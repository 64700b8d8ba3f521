//! Persistence gateway for leads.
//!
//! `AppState` holds an `Arc<dyn LeadRepository>`; handlers never touch SQL.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::lead::{Lead, NewLead};
use crate::models::Pagination;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Inserts a validated lead and returns the stored row.
    async fn create(&self, lead: &NewLead) -> Result<Lead, AppError>;

    /// Newest first, offset/limit window.
    async fn list(&self, page: Pagination) -> Result<Vec<Lead>, AppError>;
}

pub struct PgLeadRepository {
    pool: PgPool,
}

impl PgLeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn create(&self, lead: &NewLead) -> Result<Lead, AppError> {
        // Returned to the pool when `conn` drops, on every path out of here.
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (name, email, company, job_title, phone, project_description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.company)
        .bind(&lead.job_title)
        .bind(&lead.phone)
        .bind(&lead.project_description)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Lead>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let (limit, offset) = page.sql_bounds();

        let rows = sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }
}
