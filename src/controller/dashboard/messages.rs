use crate::{
    api::error::ClassifiedError,
    model::{
        attendance::{AttendanceRecord, RecordId},
        filter::FilterPatch,
    },
};

/// Every transition the dashboard state can go through.
#[derive(Debug, Clone)]
pub enum Msg {
    FetchStarted { generation: u64 },
    FetchSucceeded { generation: u64, records: Vec<AttendanceRecord> },
    FetchFailed { generation: u64, error: ClassifiedError },
    FilterChanged(FilterPatch),
    FilterCleared,
    DeleteStarted(RecordId),
    DeleteSucceeded { id: RecordId, notice: String },
    DeleteDeclined { id: RecordId, message: String },
    DeleteFailed { id: RecordId, error: ClassifiedError },
    /// The renderer went away; responses still in flight must not land.
    Detached,
    NoticeDismissed,
}
