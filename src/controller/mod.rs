pub mod dashboard;
pub mod submission;
