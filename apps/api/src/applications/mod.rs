// Job applications: multipart form -> validation -> resume written to disk ->
// single INSERT. A failed INSERT removes the resume it just wrote.

pub mod handlers;
pub mod repository;
pub mod submission;
pub mod uploads;
pub mod validation;
