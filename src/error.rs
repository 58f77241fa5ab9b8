use thiserror::Error;

use crate::{api::error::ClassifiedError, model::attendance::RecordId};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Rejected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] ClassifiedError),

    #[error("A delete for record {0} is already in progress")]
    DeleteInFlight(RecordId),

    #[error("No record with id {0} is loaded")]
    UnknownRecord(RecordId),
}

impl ClientError {
    /// Text a renderer can show as-is.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
