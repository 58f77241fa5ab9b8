#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use attendance_client::{
    AttendanceRepository, ClassifiedError, RemovalReceipt,
    model::attendance::{AttendanceRecord, AttendanceStatus, DraftRecord, RecordId},
};

type Scripted<T> = (Duration, Result<T, ClassifiedError>);

#[derive(Default)]
struct Script {
    lists: VecDeque<Scripted<Vec<AttendanceRecord>>>,
    creates: VecDeque<Scripted<Option<String>>>,
    removes: VecDeque<Scripted<RemovalReceipt>>,
    created: Vec<DraftRecord>,
    removed: Vec<RecordId>,
    list_calls: usize,
}

/// In-memory repository that replays queued answers, optionally after a delay.
///
/// Clones share the same script, so a test can keep a handle after moving one
/// into a controller.
#[derive(Clone, Default)]
pub struct ScriptedRepository {
    script: Rc<RefCell<Script>>,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, result: Result<Vec<AttendanceRecord>, ClassifiedError>) -> &Self {
        self.push_list_after(Duration::ZERO, result)
    }

    pub fn push_list_after(
        &self,
        delay: Duration,
        result: Result<Vec<AttendanceRecord>, ClassifiedError>,
    ) -> &Self {
        self.script.borrow_mut().lists.push_back((delay, result));
        self
    }

    pub fn push_create(&self, result: Result<Option<String>, ClassifiedError>) -> &Self {
        self.script.borrow_mut().creates.push_back((Duration::ZERO, result));
        self
    }

    pub fn push_remove(&self, result: Result<RemovalReceipt, ClassifiedError>) -> &Self {
        self.push_remove_after(Duration::ZERO, result)
    }

    pub fn push_remove_after(
        &self,
        delay: Duration,
        result: Result<RemovalReceipt, ClassifiedError>,
    ) -> &Self {
        self.script.borrow_mut().removes.push_back((delay, result));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.script.borrow().list_calls
    }

    pub fn created(&self) -> Vec<DraftRecord> {
        self.script.borrow().created.clone()
    }

    pub fn removed(&self) -> Vec<RecordId> {
        self.script.borrow().removed.clone()
    }
}

async fn replay<T>(entry: Option<Scripted<T>>, operation: &str) -> Result<T, ClassifiedError> {
    let (delay, result) = entry.unwrap_or_else(|| panic!("unexpected {} call", operation));
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    result
}

impl AttendanceRepository for ScriptedRepository {
    async fn list(&self) -> Result<Vec<AttendanceRecord>, ClassifiedError> {
        let entry = {
            let mut script = self.script.borrow_mut();
            script.list_calls += 1;
            script.lists.pop_front()
        };
        replay(entry, "list").await
    }

    async fn create(&self, draft: &DraftRecord) -> Result<Option<String>, ClassifiedError> {
        let entry = {
            let mut script = self.script.borrow_mut();
            script.created.push(draft.clone());
            script.creates.pop_front()
        };
        replay(entry, "create").await
    }

    async fn remove(&self, id: &RecordId) -> Result<RemovalReceipt, ClassifiedError> {
        let entry = {
            let mut script = self.script.borrow_mut();
            script.removed.push(id.clone());
            script.removes.pop_front()
        };
        replay(entry, "remove").await
    }
}

pub fn record(id: u64, name: &str, employee_id: &str, date: &str) -> AttendanceRecord {
    AttendanceRecord {
        id: id.into(),
        employee_name: Some(name.to_string()),
        employee_id: Some(employee_id.to_string()),
        date: Some(date.to_string()),
        status: Some(AttendanceStatus::Present),
    }
}

pub fn receipt(success: bool, message: Option<&str>) -> RemovalReceipt {
    RemovalReceipt {
        success,
        message: message.map(str::to_string),
    }
}
