pub mod messages;
pub mod state;
pub mod update;

use std::cell::RefCell;

use tracing::{info, warn};

use crate::{
    api::attendance::AttendanceRepository,
    error::ClientError,
    model::{
        attendance::{AttendanceRecord, RecordId},
        filter::FilterPatch,
    },
};

use messages::Msg;
use state::DashboardState;

/// Implementations must not call back into the controller.
pub trait StateSink {
    fn render(&self, state: &DashboardState);
}

impl<F> StateSink for F
where
    F: Fn(&DashboardState),
{
    fn render(&self, state: &DashboardState) {
        self(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub id: RecordId,
    pub employee_name: String,
}

impl DeletePrompt {
    fn for_record(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id.clone(),
            employee_name: record.display_name().to_string(),
        }
    }

    pub fn question(&self) -> String {
        format!("Delete record for {}?", self.employee_name)
    }
}

#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&self, prompt: &DeletePrompt) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&DeletePrompt) -> bool,
{
    async fn confirm(&self, prompt: &DeletePrompt) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// The service answered but refused the deletion.
    Declined { message: String },
}

pub struct DashboardController<R, C> {
    repository: R,
    confirm: C,
    state: RefCell<DashboardState>,
    sink: RefCell<Option<Box<dyn StateSink>>>,
}

impl<R, C> DashboardController<R, C>
where
    R: AttendanceRepository,
    C: Confirm,
{
    pub fn new(repository: R, confirm: C) -> Self {
        Self {
            repository,
            confirm,
            state: RefCell::new(DashboardState::default()),
            sink: RefCell::new(None),
        }
    }

    pub fn attach(&self, sink: impl StateSink + 'static) {
        sink.render(&self.state.borrow());
        *self.sink.borrow_mut() = Some(Box::new(sink));
    }

    /// Removes the renderer. Fetches still in flight are dropped when they land.
    pub fn detach(&self) -> Option<Box<dyn StateSink>> {
        let sink = self.sink.borrow_mut().take();
        self.dispatch(Msg::Detached);
        sink
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&DashboardState) -> T) -> T {
        f(&self.state.borrow())
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub async fn mount(&self) -> Result<(), ClientError> {
        self.refresh().await
    }

    pub async fn retry(&self) -> Result<(), ClientError> {
        self.refresh().await
    }

    /// A response that lands after a newer refresh was issued is ignored.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let generation = self.state.borrow().latest_generation() + 1;
        self.dispatch(Msg::FetchStarted { generation });
        info!(generation, "Fetching attendance records");

        match self.repository.list().await {
            Ok(records) => {
                info!(generation, count = records.len(), "Attendance records fetched");
                self.dispatch(Msg::FetchSucceeded {
                    generation,
                    records,
                });
                Ok(())
            }
            Err(error) => {
                warn!(generation, error = %error, "Fetching attendance records failed");
                self.dispatch(Msg::FetchFailed {
                    generation,
                    error: error.clone(),
                });
                Err(error.into())
            }
        }
    }

    pub fn set_filter(&self, patch: FilterPatch) {
        self.dispatch(Msg::FilterChanged(patch));
    }

    pub fn clear_filter(&self) {
        self.dispatch(Msg::FilterCleared);
    }

    pub fn dismiss_notice(&self) {
        self.dispatch(Msg::NoticeDismissed);
    }

    /// The local copy is removed only after the service reports success.
    pub async fn delete_record(&self, id: &RecordId) -> Result<DeleteOutcome, ClientError> {
        let prompt = {
            let state = self.state.borrow();
            if state.is_deleting(id) {
                return Err(ClientError::DeleteInFlight(id.clone()));
            }
            let record = state
                .find(id)
                .ok_or_else(|| ClientError::UnknownRecord(id.clone()))?;
            DeletePrompt::for_record(record)
        };

        if !self.confirm.confirm(&prompt).await {
            info!(id = %id, "Delete cancelled by user");
            return Ok(DeleteOutcome::Cancelled);
        }

        // The prompt may have been open while another delete for this id began.
        if self.state.borrow().is_deleting(id) {
            return Err(ClientError::DeleteInFlight(id.clone()));
        }
        self.dispatch(Msg::DeleteStarted(id.clone()));
        info!(id = %id, "Deleting attendance record");

        match self.repository.remove(id).await {
            Ok(receipt) if receipt.success => {
                self.dispatch(Msg::DeleteSucceeded {
                    id: id.clone(),
                    notice: format!("Record for {} deleted.", prompt.employee_name),
                });
                Ok(DeleteOutcome::Deleted)
            }
            Ok(receipt) => {
                let message = receipt.message.unwrap_or_else(|| "Delete failed".to_string());
                warn!(id = %id, message = %message, "Delete declined by service");
                self.dispatch(Msg::DeleteDeclined {
                    id: id.clone(),
                    message: message.clone(),
                });
                Ok(DeleteOutcome::Declined { message })
            }
            Err(error) => {
                warn!(id = %id, error = %error, "Delete failed");
                self.dispatch(Msg::DeleteFailed {
                    id: id.clone(),
                    error: error.clone(),
                });
                Err(error.into())
            }
        }
    }

    fn dispatch(&self, msg: Msg) {
        let changed = update::update(&mut self.state.borrow_mut(), msg);
        if !changed {
            return;
        }
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink.render(&self.state.borrow());
        }
    }
}
