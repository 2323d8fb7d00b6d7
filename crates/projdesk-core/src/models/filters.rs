use chrono::NaiveDate;

use super::{calendar_date, ProjectStatus};

/// Collection-view filters. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub status: Option<ProjectStatus>,
    pub keyword: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.keyword().is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Keyword with surrounding whitespace removed; blank counts as absent.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Query parameters for `GET /projects`, omitting unset fields.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(keyword) = self.keyword() {
            query.push(("keyword", keyword.to_string()));
        }
        if let Some(date) = &self.start_date {
            query.push(("start_date", calendar_date::format(date)));
        }
        if let Some(date) = &self.end_date {
            query.push(("end_date", calendar_date::format(date)));
        }
        query
    }
}
