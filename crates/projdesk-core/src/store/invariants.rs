//! Coherence checks between the collection and detail views.
//!
//! A mutation transition is rejected when it introduces an issue that the
//! previous snapshot did not have. Issues already present in server data are
//! tolerated so a single bad fetch cannot wedge every later mutation.

use std::collections::HashSet;

use super::Snapshot;

/// Every coherence problem present in `snapshot`, described for logging.
pub fn coherence_issues(snapshot: &Snapshot) -> Vec<String> {
    let mut issues = Vec::new();

    if let Some(id) = first_duplicate(snapshot.projects.iter().map(|p| p.id.as_str())) {
        issues.push(format!("project {} listed twice", id));
    }

    for summary in &snapshot.projects {
        if let Some(id) = first_duplicate(summary.notes.iter().map(String::as_str)) {
            issues.push(format!("project {} references note {} twice", summary.id, id));
        }
        if let Some(id) = first_duplicate(summary.files.iter().map(String::as_str)) {
            issues.push(format!("project {} references file {} twice", summary.id, id));
        }
    }

    let Some(detail) = &snapshot.active_project else {
        return issues;
    };

    if let Some(id) = first_duplicate(detail.notes.iter().map(|n| n.id.as_str())) {
        issues.push(format!("open project {} holds note {} twice", detail.id, id));
    }
    if let Some(id) = first_duplicate(detail.files.iter().map(|f| f.id.as_str())) {
        issues.push(format!("open project {} holds file {} twice", detail.id, id));
    }

    if let Some(summary) = snapshot.project(&detail.id) {
        let listed: HashSet<&str> = summary.notes.iter().map(String::as_str).collect();
        let open: HashSet<&str> = detail.notes.iter().map(|n| n.id.as_str()).collect();
        if listed != open {
            issues.push(format!("project {} notes differ between views", detail.id));
        }

        let listed: HashSet<&str> = summary.files.iter().map(String::as_str).collect();
        let open: HashSet<&str> = detail.files.iter().map(|f| f.id.as_str()).collect();
        if listed != open {
            issues.push(format!("project {} files differ between views", detail.id));
        }
    }

    issues
}

/// `Err` with the new issues if `after` is less coherent than `before`.
pub fn check_transition(before: &Snapshot, after: &Snapshot) -> Result<(), String> {
    let existing: HashSet<String> = coherence_issues(before).into_iter().collect();
    let introduced: Vec<String> = coherence_issues(after)
        .into_iter()
        .filter(|issue| !existing.contains(issue))
        .collect();

    if introduced.is_empty() {
        Ok(())
    } else {
        Err(introduced.join("; "))
    }
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
