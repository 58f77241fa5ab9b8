use crate::model::{attendance::AttendanceRecord, filter::FilterCriteria};

/// Narrows `records` to those matching every non-empty field of `criteria`.
///
/// Matching is case-insensitive: `date` is a prefix match, name and employee
/// id are substring matches. Input order is kept. A record missing a field
/// never matches a non-empty constraint on that field.
pub fn apply(records: &[AttendanceRecord], criteria: &FilterCriteria) -> Vec<AttendanceRecord> {
    let matcher = Matcher::new(criteria);
    records
        .iter()
        .filter(|record| matcher.matches(record))
        .cloned()
        .collect()
}

/// Lower-cased criteria, computed once per pass.
struct Matcher {
    date: String,
    employee_name: String,
    employee_id: String,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        Self {
            date: criteria.date.to_lowercase(),
            employee_name: criteria.employee_name.to_lowercase(),
            employee_id: criteria.employee_id.to_lowercase(),
        }
    }

    fn matches(&self, record: &AttendanceRecord) -> bool {
        field_matches(&self.date, record.date.as_deref(), |value, needle| {
            value.starts_with(needle)
        }) && field_matches(
            &self.employee_name,
            record.employee_name.as_deref(),
            |value, needle| value.contains(needle),
        ) && field_matches(
            &self.employee_id,
            record.employee_id.as_deref(),
            |value, needle| value.contains(needle),
        )
    }
}

#[inline]
fn field_matches(needle: &str, value: Option<&str>, test: impl Fn(&str, &str) -> bool) -> bool {
    if needle.is_empty() {
        return true;
    }
    match value {
        Some(value) => test(&value.to_lowercase(), needle),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;

    fn record(id: u64, name: Option<&str>, emp: Option<&str>, date: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: id.into(),
            employee_name: name.map(str::to_string),
            employee_id: emp.map(str::to_string),
            date: date.map(str::to_string),
            status: Some(AttendanceStatus::Present),
        }
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record(1, Some("Asha Rao"), Some("E1"), Some("2024-01-05")),
            record(2, Some("Bilal"), Some("E12"), Some("2024-02-10T00:00:00.000Z")),
            record(3, None, Some("X9"), None),
            record(4, Some("asha k"), Some("e3"), Some("2023-12-31")),
        ]
    }

    fn criteria(date: &str, name: &str, id: &str) -> FilterCriteria {
        FilterCriteria {
            date: date.to_string(),
            employee_name: name.to_string(),
            employee_id: id.to_string(),
        }
    }

    fn ids(records: &[AttendanceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_keeps_everything_in_order() {
        let records = sample();
        assert_eq!(apply(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn date_is_a_prefix_match() {
        let records = sample();
        assert_eq!(ids(&apply(&records, &criteria("2024", "", ""))), vec!["1", "2"]);
        assert_eq!(ids(&apply(&records, &criteria("2024-02", "", ""))), vec!["2"]);
        assert!(apply(&records, &criteria("01-05", "", "")).is_empty());
    }

    #[test]
    fn name_and_id_are_case_insensitive_substrings() {
        let records = sample();
        assert_eq!(ids(&apply(&records, &criteria("", "ASH", ""))), vec!["1", "4"]);
        assert_eq!(ids(&apply(&records, &criteria("", "", "e1"))), vec!["1", "2"]);
    }

    #[test]
    fn missing_fields_never_match() {
        let records = sample();
        assert!(!ids(&apply(&records, &criteria("", "", "x"))).is_empty());
        assert_eq!(ids(&apply(&records, &criteria("2", "", "X9"))), Vec::<&str>::new());
        assert_eq!(ids(&apply(&records, &criteria("", "a", "X9"))), Vec::<&str>::new());
    }

    #[test]
    fn criteria_combine_as_conjunction() {
        let records = sample();
        let c = criteria("2024", "asha", "e");
        let combined = apply(&records, &c);
        let each: Vec<_> = records
            .iter()
            .filter(|r| {
                let one = |c: FilterCriteria| !apply(std::slice::from_ref(*r), &c).is_empty();
                one(criteria("2024", "", "")) && one(criteria("", "asha", "")) && one(criteria("", "", "e"))
            })
            .cloned()
            .collect();
        assert_eq!(combined, each);
        assert_eq!(ids(&combined), vec!["1"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let c = criteria("", "a", "");
        let once = apply(&records, &c);
        assert_eq!(apply(&once, &c), once);
    }
}
