use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identity assigned by the remote service.
///
/// The service has been seen to send both numeric and string ids, so both
/// are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display, derive_more::From)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => RecordId(n.to_string()),
            Raw::Text(s) => RecordId(s),
        })
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum AttendanceStatus {
    #[default]
    #[strum(ascii_case_insensitive)]
    Present,
    #[strum(ascii_case_insensitive)]
    Absent,
}

/// One attendance entry as held by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(alias = "ID")]
    pub id: RecordId,

    #[serde(rename = "employeeName", default)]
    pub employee_name: Option<String>,

    #[serde(rename = "employeeID", default)]
    pub employee_id: Option<String>,

    /// Raw date string, `YYYY-MM-DD` optionally followed by a time part.
    #[serde(default)]
    pub date: Option<String>,

    /// `None` when the service sent no status or one this client does not know.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<AttendanceStatus>,
}

fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AttendanceStatus>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

impl AttendanceRecord {
    /// Calendar day of the entry, if the date string starts with one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()
    }

    pub fn display_name(&self) -> &str {
        self.employee_name.as_deref().unwrap_or("unknown employee")
    }
}

/// Form state for a record that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecord {
    pub employee_name: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl DraftRecord {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            employee_name: String::new(),
            employee_id: String::new(),
            date,
            status: AttendanceStatus::Present,
        }
    }

    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

impl Default for DraftRecord {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numeric_and_upper_case_ids() {
        let numeric: AttendanceRecord = serde_json::from_value(json!({
            "id": 7,
            "employeeName": "Asha",
            "employeeID": "E1",
            "date": "2024-01-05",
            "status": "Present"
        }))
        .unwrap();
        assert_eq!(numeric.id, RecordId::from(7u64));

        let upper: AttendanceRecord = serde_json::from_value(json!({
            "ID": "abc",
            "employeeName": null,
            "status": "Absent"
        }))
        .unwrap();
        assert_eq!(upper.id.as_str(), "abc");
        assert_eq!(upper.employee_name, None);
        assert_eq!(upper.date, None);
        assert_eq!(upper.status, Some(AttendanceStatus::Absent));
    }

    #[test]
    fn calendar_date_ignores_time_suffix() {
        let record = AttendanceRecord {
            id: "1".into(),
            employee_name: None,
            employee_id: None,
            date: Some("2024-01-05T00:00:00.000Z".to_string()),
            status: Some(AttendanceStatus::Present),
        };
        assert_eq!(record.calendar_date(), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn odd_or_missing_status_does_not_reject_the_row() {
        let rows: Vec<AttendanceRecord> = serde_json::from_value(json!([
            { "id": 1, "status": "present" },
            { "id": 2, "status": "ABSENT " },
            { "id": 3 },
            { "id": 4, "status": null },
            { "id": 5, "status": "On leave" }
        ]))
        .unwrap();

        let statuses: Vec<_> = rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                Some(AttendanceStatus::Present),
                Some(AttendanceStatus::Absent),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("absent".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::Present.to_string(), "Present");
    }
}
