use std::collections::{HashMap, HashSet};

use crate::{
    api::error::ClassifiedError,
    model::{
        attendance::{AttendanceRecord, RecordId},
        filter::FilterCriteria,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ClassifiedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    /// Previously loaded records are kept but not shown alongside the error.
    Failed { message: &'a str },
    Records {
        rows: &'a [AttendanceRecord],
        shown: usize,
        total: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub(crate) fetch: FetchState,
    pub(crate) records: Vec<AttendanceRecord>,
    pub(crate) criteria: FilterCriteria,
    pub(crate) filtered: Vec<AttendanceRecord>,
    pub(crate) latest_generation: u64,
    pub(crate) pending_deletes: HashSet<RecordId>,
    /// Confirmed deletes, keyed to the latest generation when each was confirmed.
    pub(crate) deleted_at: HashMap<RecordId, u64>,
    pub(crate) notice: Option<Notice>,
}

impl DashboardState {
    pub fn fetch(&self) -> &FetchState {
        &self.fetch
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[AttendanceRecord] {
        &self.filtered
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_deleting(&self, id: &RecordId) -> bool {
        self.pending_deletes.contains(id)
    }

    pub fn find(&self, id: &RecordId) -> Option<&AttendanceRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} records",
            self.filtered.len(),
            self.records.len()
        )
    }

    pub fn view(&self) -> DashboardView<'_> {
        match &self.fetch {
            FetchState::Idle | FetchState::Loading => DashboardView::Loading,
            FetchState::Failed(error) => DashboardView::Failed {
                message: &error.message,
            },
            FetchState::Loaded => DashboardView::Records {
                rows: &self.filtered,
                shown: self.filtered.len(),
                total: self.records.len(),
            },
        }
    }
}
