//! Filter edits typed in `watch` mode, one per line.

use chrono::NaiveDate;
use projdesk_core::models::calendar_date;
use projdesk_core::models::ProjectStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Status(Option<ProjectStatus>),
    Keyword(Option<String>),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Reset,
    Quit,
}

/// Parse `field=value`. An empty value clears the field.
///
/// Accepted fields: `status`, `keyword` (or `q`), `start`, `end`; plus the
/// bare words `reset` and `quit`.
pub fn parse_edit(line: &str) -> Result<FilterEdit, String> {
    let line = line.trim();
    match line {
        "reset" => return Ok(FilterEdit::Reset),
        "quit" | "exit" | "q!" => return Ok(FilterEdit::Quit),
        _ => {}
    }

    let Some((field, value)) = line.split_once('=') else {
        return Err(format!("expected field=value, got '{}'", line));
    };
    let value = value.trim();

    match field.trim() {
        "status" => {
            if value.is_empty() {
                return Ok(FilterEdit::Status(None));
            }
            value
                .parse::<ProjectStatus>()
                .map(|s| FilterEdit::Status(Some(s)))
                .map_err(|e| e.to_string())
        }
        "keyword" | "q" => Ok(FilterEdit::Keyword(
            (!value.is_empty()).then(|| value.to_string()),
        )),
        "start" => parse_date(value).map(FilterEdit::StartDate),
        "end" => parse_date(value).map(FilterEdit::EndDate),
        other => Err(format!("unknown filter '{}'", other)),
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    calendar_date::parse(value)
        .map(Some)
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}
