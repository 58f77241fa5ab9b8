/// Active filter constraints. Empty fields constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Prefix of the record's date string, so `2024` or `2024-01` also work.
    pub date: String,
    pub employee_name: String,
    pub employee_id: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.employee_name.is_empty() && self.employee_id.is_empty()
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(name) = patch.employee_name {
            self.employee_name = name;
        }
        if let Some(id) = patch.employee_id {
            self.employee_id = id;
        }
    }
}

/// Partial update to [`FilterCriteria`]; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub date: Option<String>,
    pub employee_name: Option<String>,
    pub employee_id: Option<String>,
}

impl FilterPatch {
    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn employee_name(value: impl Into<String>) -> Self {
        Self {
            employee_name: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn employee_id(value: impl Into<String>) -> Self {
        Self {
            employee_id: Some(value.into()),
            ..Self::default()
        }
    }
}
