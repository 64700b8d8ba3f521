use std::sync::Arc;

use crate::applications::repository::ApplicationRepository;
use crate::applications::uploads::ResumeStorage;
use crate::config::Config;
use crate::leads::repository::LeadRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for leads. Default: `PgLeadRepository`.
    pub leads: Arc<dyn LeadRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    /// Upload root and size limit for resumes, taken from `Config` at startup.
    pub resumes: Arc<ResumeStorage>,
    pub config: Arc<Config>,
}
