//! Project event log.
//!
//! Every run appends its outcomes to
//! `<project>/.git/codegenesis/events.ndjson`, one JSON object per line.
//! The file lives inside `.git`, so it is never part of the working tree and
//! only exists once the repository does.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`setup`, `finalize`, `repo_created`, ...)
//! - `actor`: `user@HOST`
//! - `repo`: remote repository name, for remote events
//! - `details`: action-specific object

use crate::error::{GenesisError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Setup,
    SetupFailed,
    Finalize,
    FinalizeFailed,
    /// A remote repository was created for the project.
    RepoCreated,
    /// An existing remote repository was deleted to be replaced.
    RepoDeleted,
    /// GitHub was requested but the project stayed local.
    RemoteSkipped,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Setup => write!(f, "setup"),
            EventAction::SetupFailed => write!(f, "setup_failed"),
            EventAction::Finalize => write!(f, "finalize"),
            EventAction::FinalizeFailed => write!(f, "finalize_failed"),
            EventAction::RepoCreated => write!(f, "repo_created"),
            EventAction::RepoDeleted => write!(f, "repo_deleted"),
            EventAction::RemoteSkipped => write!(f, "remote_skipped"),
        }
    }
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    pub details: Value,
}

impl Event {
    /// An event timestamped now, attributed to the current `user@HOST`.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: crate::locks::owner_string(),
            repo: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            GenesisError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Path of the event log for a project.
pub fn events_file_path(project_dir: &Path) -> PathBuf {
    project_dir
        .join(".git")
        .join("codegenesis")
        .join("events.ndjson")
}

/// Append one event to the project's log, creating the file if needed.
///
/// The repository must already exist; the log is never written into a
/// directory git does not manage.
pub fn append_event(project_dir: &Path, event: &Event) -> Result<()> {
    if !project_dir.join(".git").is_dir() {
        return Err(GenesisError::UserError(format!(
            "cannot log '{}' event: '{}' has no git repository yet",
            event.action,
            project_dir.display()
        )));
    }

    let events_file = events_file_path(project_dir);
    let json_line = event.to_ndjson_line()?;

    if let Some(events_dir) = events_file.parent() {
        fs::create_dir_all(events_dir).map_err(|e| {
            GenesisError::UserError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            GenesisError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            GenesisError::UserError(format!(
                "failed to write event to '{}': {}",
                events_file.display(),
                e
            ))
        })
}

/// Read every event in the project's log, oldest first. A missing log is
/// empty.
pub fn read_events(project_dir: &Path) -> Result<Vec<Event>> {
    let events_file = events_file_path(project_dir);
    let content = match fs::read_to_string(&events_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(GenesisError::UserError(format!(
                "failed to read events file '{}': {}",
                events_file.display(),
                e
            )));
        }
    };

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                GenesisError::UserError(format!(
                    "corrupt line in '{}': {}",
                    events_file.display(),
                    e
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_repo;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Setup);

        assert_eq!(event.action, EventAction::Setup);
        assert!(event.actor.contains('@'));
        assert!(event.repo.is_none());
        assert!(Utc::now().signed_duration_since(event.ts).num_minutes() < 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::new(EventAction::RepoCreated)
            .with_repo("demo")
            .with_details(json!({"url": "https://github.com/octo/demo.git", "private": false}));

        let line = event.to_ndjson_line().unwrap();

        assert!(!line.contains('\n'));
        assert!(line.contains(r#""action":"repo_created""#));
        assert!(line.contains(r#""repo":"demo""#));
        assert!(line.contains(r#""private":false"#));
    }

    #[test]
    fn test_event_without_repo_omits_field() {
        let line = Event::new(EventAction::Finalize).to_ndjson_line().unwrap();
        assert!(!line.contains("\"repo\""));
    }

    #[test]
    fn test_event_action_display_matches_serde() {
        for action in [
            EventAction::Setup,
            EventAction::SetupFailed,
            EventAction::Finalize,
            EventAction::FinalizeFailed,
            EventAction::RepoCreated,
            EventAction::RepoDeleted,
            EventAction::RemoteSkipped,
        ] {
            let serialized = serde_json::to_value(action).unwrap();
            assert_eq!(serialized, json!(action.to_string()));
        }
    }

    #[test]
    fn test_append_and_read_events() {
        let temp_dir = create_test_repo();

        append_event(temp_dir.path(), &Event::new(EventAction::Setup)).unwrap();
        append_event(
            temp_dir.path(),
            &Event::new(EventAction::FinalizeFailed)
                .with_details(json!({"step": "merge dev into feature-x"})),
        )
        .unwrap();

        let content = fs::read_to_string(events_file_path(temp_dir.path())).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));

        let events = read_events(temp_dir.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, EventAction::Setup);
        assert_eq!(events[1].details["step"], "merge dev into feature-x");
    }

    #[test]
    fn test_append_requires_repository() {
        let temp_dir = TempDir::new().unwrap();

        let err = append_event(temp_dir.path(), &Event::new(EventAction::Setup)).unwrap_err();

        assert!(err.to_string().contains("no git repository"));
        assert!(!temp_dir.path().join(".git").exists());
    }

    #[test]
    fn test_events_stay_out_of_the_working_tree() {
        let temp_dir = create_test_repo();
        append_event(temp_dir.path(), &Event::new(EventAction::Setup)).unwrap();

        let output = std::process::Command::new("git")
            .current_dir(temp_dir.path())
            .args(["status", "--porcelain"])
            .output()
            .unwrap();
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_read_events_missing_log_is_empty() {
        let temp_dir = create_test_repo();
        assert!(read_events(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_events_file_path() {
        assert_eq!(
            events_file_path(Path::new("/work/demo")),
            Path::new("/work/demo/.git/codegenesis/events.ndjson")
        );
    }
}
