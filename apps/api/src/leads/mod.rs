// Contact-form leads: JSON submission -> validation -> single INSERT.

pub mod handlers;
pub mod repository;
pub mod validation;
