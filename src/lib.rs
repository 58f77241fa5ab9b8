//! Client core for recording and reviewing employee attendance against a
//! remote attendance service.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod models;
pub mod utils;

pub use api::attendance::{AttendanceRepository, HttpAttendanceRepository, RemovalReceipt};
pub use api::error::{ClassifiedError, ErrorKind, Failure, classify};
pub use config::Config;
pub use controller::dashboard::{
    Confirm, DashboardController, DeleteOutcome, DeletePrompt, StateSink,
    state::{DashboardState, DashboardView, FetchState},
};
pub use controller::submission::{Recorded, SubmissionController, SubmissionState};
pub use error::ClientError;
