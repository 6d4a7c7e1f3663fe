//! Terminal output for the new command.

use super::ProjectOutcome;
use crate::github::Provisioned;
use crate::workflow::ProgressEvent;

/// One line per interesting progress event. Step starts are not shown; the
/// completion line follows immediately.
pub(super) fn render_event(event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::PhaseStarted(phase) => Some(format!("==> {}", phase)),
        ProgressEvent::StepStarted(_) | ProgressEvent::PhaseCompleted(_) => None,
        ProgressEvent::StepCompleted(step) => Some(format!("  ok    {}", step)),
        ProgressEvent::StepSkipped { step, reason } => {
            Some(format!("  skip  {} ({})", step, reason))
        }
        ProgressEvent::StepFailed { step, detail } => {
            Some(format!("  FAIL  {}: {}", step, detail.trim()))
        }
        ProgressEvent::Note(message) => Some(format!("  ...   {}", message)),
    }
}

pub(super) fn summary_lines(outcome: &ProjectOutcome) -> Vec<String> {
    let mut lines = vec![format!("Created project at {}", outcome.dir.display())];

    match &outcome.remote {
        Some(Provisioned::Created { url, replaced, .. }) => {
            let note = if *replaced { " (replaced existing)" } else { "" };
            lines.push(format!("  Remote:        {}{}", url, note));
        }
        Some(Provisioned::LocalOnly { reason }) => {
            lines.push(format!("  Remote:        none ({})", reason));
        }
        None => lines.push("  Remote:        none".to_string()),
    }

    let report = &outcome.workflow;
    if !report.pushed.is_empty() {
        lines.push(format!("  Pushed:        {}", report.pushed.join(", ")));
    }
    if !report.local_only.is_empty() {
        lines.push(format!("  Local only:    {}", report.local_only.join(", ")));
    }
    lines.push(format!("  Active branch: {}", report.active_branch));

    lines.push(format!(
        "  Files:         {} created, {} kept",
        outcome.files.created.len(),
        outcome.files.skipped.len()
    ));
    for path in &outcome.files.skipped {
        lines.push(format!("    kept existing {}", path.display()));
    }

    lines
}

pub(super) fn print_summary(outcome: &ProjectOutcome) {
    println!();
    for line in summary_lines(outcome) {
        println!("{}", line);
    }
}
