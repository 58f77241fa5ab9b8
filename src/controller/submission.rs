use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::{
    api::attendance::AttendanceRepository,
    error::{ClientError, REQUIRED_FIELDS_MESSAGE},
    model::attendance::DraftRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: Option<String>,
    },
    Failed(ClientError),
}

/// Confirmation of a recorded entry, carrying the service's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub message: Option<String>,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Owns the draft being filled in and submits it.
pub struct SubmissionController<R> {
    repository: R,
    draft: DraftRecord,
    state: SubmissionState,
    today: fn() -> NaiveDate,
    on_recorded: Option<Box<dyn Fn()>>,
}

impl<R: AttendanceRepository> SubmissionController<R> {
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, local_today)
    }

    /// Uses `today` to seed the draft's date on mount and after each success.
    pub fn with_clock(repository: R, today: fn() -> NaiveDate) -> Self {
        Self {
            repository,
            draft: DraftRecord::for_date(today()),
            state: SubmissionState::Idle,
            today,
            on_recorded: None,
        }
    }

    /// Called after every successful submission so the owner can decide
    /// whether to reload the dashboard.
    pub fn on_recorded(mut self, listener: impl Fn() + 'static) -> Self {
        self.on_recorded = Some(Box::new(listener));
        self
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftRecord {
        &mut self.draft
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// The submit control should be disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    pub fn reset_draft(&mut self) {
        self.draft = DraftRecord::for_date((self.today)());
    }

    /// Validates and sends the current draft.
    ///
    /// On success the draft goes back to its defaults. On failure it is left
    /// untouched so the user can fix it and try again.
    pub async fn submit(&mut self) -> Result<Recorded, ClientError> {
        if let Err(e) = validate(&self.draft) {
            self.state = SubmissionState::Failed(e.clone());
            return Err(e);
        }

        self.state = SubmissionState::Submitting;
        info!(
            employee_id = %self.draft.employee_id.trim(),
            date = %self.draft.date,
            status = %self.draft.status,
            "Recording attendance"
        );

        match self.repository.create(&self.draft).await {
            Ok(message) => {
                self.reset_draft();
                self.state = SubmissionState::Succeeded {
                    message: message.clone(),
                };
                if let Some(listener) = &self.on_recorded {
                    listener();
                }
                Ok(Recorded { message })
            }
            Err(error) => {
                warn!(error = %error, "Recording attendance failed");
                let error = ClientError::from(error);
                self.state = SubmissionState::Failed(error.clone());
                Err(error)
            }
        }
    }
}

fn validate(draft: &DraftRecord) -> Result<(), ClientError> {
    if draft.employee_name.trim().is_empty() || draft.employee_id.trim().is_empty() {
        return Err(ClientError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    Ok(())
}
