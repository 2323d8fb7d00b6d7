//! Interactive filter mode: one filter edit per stdin line, the collection
//! is re-rendered whenever a fetch settles.

use anyhow::Result;
use projdesk_core::{FetchStatus, FilterGate, ProjectApi};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::edit::{parse_edit, FilterEdit};
use super::render;
use super::App;

const HELP: &str = "Edits: status=<draft|active|on-hold|completed>, keyword=<text>, \
start=<YYYY-MM-DD>, end=<YYYY-MM-DD> (empty value clears), reset, quit";

pub async fn run<A: ProjectApi>(app: &App<A>) -> Result<()> {
    eprintln!("{}", HELP);
    run_with_input(app, BufReader::new(tokio::io::stdin())).await
}

/// Drive the filter gate from `input` until EOF or `quit`. Edits still
/// waiting out the quiescence period are fetched before returning.
pub async fn run_with_input<A, R>(app: &App<A>, input: R) -> Result<()>
where
    A: ProjectApi,
    R: AsyncBufRead + Unpin,
{
    let gate = app.filter_gate();
    let _subscription = app.store.subscribe(|snapshot| {
        if snapshot.fetch_status != FetchStatus::Loading {
            print!("{}", render::collection(snapshot));
        }
    });

    let initial = gate.flush();

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_edit(&line) {
            Ok(FilterEdit::Quit) => break,
            Ok(edit) => apply(&gate, edit),
            Err(e) => eprintln!("{}", e),
        }
    }

    if let Err(err) = initial.await {
        tracing::debug!(error = %err, "initial fetch task ended abnormally");
    }
    gate.settle().await;
    Ok(())
}

fn apply<A: ProjectApi>(gate: &FilterGate<A>, edit: FilterEdit) {
    match edit {
        FilterEdit::Status(status) => gate.set_status(status),
        FilterEdit::Keyword(keyword) => gate.set_keyword(keyword),
        FilterEdit::StartDate(date) => gate.set_start_date(date),
        FilterEdit::EndDate(date) => gate.set_end_date(date),
        FilterEdit::Reset => gate.reset(),
        FilterEdit::Quit => {}
    }
}
