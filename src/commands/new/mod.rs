//! Implementation of the `codegenesis new` command.
//!
//! # What `codegenesis new` does
//!
//! 1. Validates the arguments (nothing is touched on failure)
//! 2. Creates the project directory, takes the workspace lock and refuses a
//!    repository that setup cannot build on
//! 3. Provisions the GitHub repository when `--github` is given
//! 4. Runs setup: repository, empty `main`, remote seed, branch skeleton
//! 5. Excludes the lock file from git and writes the boilerplate on `dev`
//! 6. Runs finalize: commit on `dev`, merge into feature branches, push
//!
//! Steps 4 to 6 run on a worker thread; their progress is streamed back and
//! printed as it happens. Phase outcomes and remote actions are appended to
//! the project event log.

mod output;
mod validation;


pub use validation::{NewProject, RemoteChoice};

use crate::cli::NewArgs;
use crate::config::{Config, Credentials};
use crate::error::{GenesisError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::ensure_dir;
use crate::git::{ProcessRunner, exclude_from_git};
use crate::github::{GitHubClient, Provisioned, RemoteProvider, provision};
use crate::locks::{LOCK_FILE, acquire_workspace_lock};
use crate::scaffold::{ScaffoldReport, Scaffolder};
use crate::sync::RemoteBinding;
use crate::workflow::{
    ProgressEvent, Workflow, WorkflowPlan, WorkflowReport, check_preconditions, spawn_worker,
};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Result of a successful `new` run.
#[derive(Debug, Clone)]
pub struct ProjectOutcome {
    pub dir: PathBuf,
    /// `None` when GitHub was not requested.
    pub remote: Option<Provisioned>,
    pub workflow: WorkflowReport,
    pub files: ScaffoldReport,
}

/// Execute the `codegenesis new` command.
pub fn cmd_new(args: NewArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        GenesisError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    let config = Config::resolve(args.config.as_deref(), &cwd)?;

    // Templates come from GitHub whenever credentials exist, --github or not.
    let client = GitHubClient::from_config(&config, Credentials::from_env());
    let project = NewProject::from_args(&args, &config, client.is_available())?;

    let outcome = create_project(project, client, |event| {
        if let Some(line) = output::render_event(event) {
            eprintln!("{}", line);
        }
    })?;

    output::print_summary(&outcome);
    Ok(())
}

/// Create the project described by `project`.
///
/// `on_event` sees every progress event from the worker thread, in order.
pub fn create_project<P, F>(project: NewProject, provider: P, mut on_event: F) -> Result<ProjectOutcome>
where
    P: RemoteProvider + Send + 'static,
    F: FnMut(&ProgressEvent),
{
    if project.create_dir {
        ensure_dir(&project.dir)?;
    }
    let lock = acquire_workspace_lock(&project.dir, "new")?;

    let mut runner = ProcessRunner::new(&project.dir).with_timeout(project.command_timeout);
    runner = match &project.email {
        Some(email) => runner.with_identity(&project.author, email),
        None => runner
            .with_env("GIT_AUTHOR_NAME", project.author.as_str())
            .with_env("GIT_COMMITTER_NAME", project.author.as_str()),
    };

    // Nothing remote is touched for a directory setup would refuse.
    check_preconditions(&runner, &project.layout.main)?;

    let remote = match &project.remote {
        RemoteChoice::Off => None,
        RemoteChoice::Skipped(reason) => {
            tracing::warn!(reason = %reason, "skipping GitHub");
            Some(Provisioned::LocalOnly {
                reason: reason.clone(),
            })
        }
        RemoteChoice::Provision(request) => {
            let provisioned = provision(&provider, request)?;
            if let Provisioned::LocalOnly { reason } = &provisioned {
                tracing::warn!(reason = %reason, "no GitHub repository; the project stays local");
            }
            Some(provisioned)
        }
    };

    let plan = WorkflowPlan {
        layout: project.layout.clone(),
        remote: remote.as_ref().and_then(Provisioned::url).map(|url| RemoteBinding {
            name: project.remote_name.clone(),
            url: url.to_string(),
        }),
    };

    let worker = spawn_worker(move |progress| {
        let dir = project.dir.clone();
        let mut workflow = Workflow::new(runner, plan).with_progress(progress.clone());

        if let Err(e) = workflow.setup() {
            record_failure(&dir, EventAction::SetupFailed, &e);
            return Err(e);
        }
        exclude_from_git(&dir, LOCK_FILE)?;
        append_event(
            &dir,
            &Event::new(EventAction::Setup).with_details(json!({
                "branches": project.layout.all().map(|b| b.as_str()).collect::<Vec<_>>(),
            })),
        )?;
        if let Some(remote) = &remote {
            record_remote(&dir, remote)?;
        }

        progress.note("writing project files");
        let mut scaffold = project.scaffold.clone();
        if let Some(name) = remote.as_ref().and_then(Provisioned::name) {
            scaffold.display_name = name.to_string();
        }
        let files = Scaffolder::new(&provider, &dir).write_all(&scaffold)?;

        let report = match workflow.finalize() {
            Ok(report) => report,
            Err(e) => {
                record_failure(&dir, EventAction::FinalizeFailed, &e);
                return Err(e);
            }
        };
        append_event(
            &dir,
            &Event::new(EventAction::Finalize).with_details(json!({
                "pushed": report.pushed,
                "local_only": report.local_only,
                "files_created": files.created.len(),
            })),
        )?;

        Ok(ProjectOutcome {
            dir,
            remote,
            workflow: report,
            files,
        })
    });

    for event in worker.events().iter() {
        on_event(&event);
    }
    let outcome = worker.join()?;

    lock.release()?;
    Ok(outcome)
}

fn record_remote(dir: &Path, remote: &Provisioned) -> Result<()> {
    match remote {
        Provisioned::Created {
            name,
            url,
            replaced,
        } => {
            if *replaced {
                append_event(dir, &Event::new(EventAction::RepoDeleted).with_repo(name))?;
            }
            append_event(
                dir,
                &Event::new(EventAction::RepoCreated)
                    .with_repo(name)
                    .with_details(json!({ "url": url })),
            )
        }
        Provisioned::LocalOnly { reason } => append_event(
            dir,
            &Event::new(EventAction::RemoteSkipped).with_details(json!({ "reason": reason })),
        ),
    }
}

/// Log a failed phase without masking the failure itself.
fn record_failure(dir: &Path, action: EventAction, err: &GenesisError) {
    if !dir.join(".git").is_dir() {
        return;
    }
    let mut details = json!({ "error": err.to_string() });
    if let Some(step) = err.failed_step() {
        details["step"] = json!(step.to_string());
    }
    if let Err(e) = append_event(dir, &Event::new(action).with_details(details)) {
        tracing::warn!(error = %e, "failed to record {} event", action);
    }
}
