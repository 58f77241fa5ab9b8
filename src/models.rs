use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::attendance::{AttendanceStatus, DraftRecord};

#[derive(Debug, Serialize)]
pub struct CreateAttendanceReq<'a> {
    #[serde(rename = "employeeName")]
    pub employee_name: &'a str,
    #[serde(rename = "employeeID")]
    pub employee_id: &'a str,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl<'a> From<&'a DraftRecord> for CreateAttendanceReq<'a> {
    fn from(draft: &'a DraftRecord) -> Self {
        Self {
            employee_name: draft.employee_name.trim(),
            employee_id: draft.employee_id.trim(),
            date: draft.date,
            status: draft.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx reply.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
