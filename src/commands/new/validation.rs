//! Input checks for the new command.
//!
//! Everything here runs before the project directory is touched, so a
//! rejected invocation leaves no trace on disk.

use crate::cli::NewArgs;
use crate::config::Config;
use crate::error::{GenesisError, Result};
use crate::github::{RepoRequest, validate_repo_name};
use crate::scaffold::ScaffoldPlan;
use crate::topology::BranchLayout;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What to do about GitHub for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteChoice {
    /// `--github` was not given.
    Off,
    /// `--github` was given but cannot be honored.
    Skipped(String),
    Provision(RepoRequest),
}

/// A validated `new` invocation.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub author: String,
    pub email: Option<String>,
    /// The project directory.
    pub dir: PathBuf,
    /// Whether `dir` may be created.
    pub create_dir: bool,
    pub layout: BranchLayout,
    pub remote_name: String,
    pub command_timeout: Duration,
    pub scaffold: ScaffoldPlan,
    pub remote: RemoteChoice,
}

impl NewProject {
    /// Validate `args` against `config`.
    ///
    /// `credentials_available` says whether GitHub can be reached at all;
    /// without it `--github` degrades to [`RemoteChoice::Skipped`].
    pub fn from_args(args: &NewArgs, config: &Config, credentials_available: bool) -> Result<Self> {
        let name = args.name.trim().to_string();
        validate_project_name(&name)?;

        let author = args.author.trim().to_string();
        if author.is_empty() {
            return Err(GenesisError::UserError(
                "author cannot be empty.\n\nPass the name to credit with --author.".to_string(),
            ));
        }

        let email = args
            .email
            .clone()
            .or_else(|| config.git_user_email.clone())
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let layout = config.branch_layout(&args.branches)?;
        let dir = resolve_project_dir(&args.dest, &name, args.existing)?;

        let languages = if args.languages.is_empty() {
            config.default_languages.clone()
        } else {
            args.languages.clone()
        };
        let license_key = args
            .license
            .clone()
            .unwrap_or_else(|| config.default_license.clone());

        let remote = if !args.github {
            RemoteChoice::Off
        } else if !credentials_available {
            RemoteChoice::Skipped(
                "GITHUB_PAT and GITHUB_USERNAME are not set; the project stays local".to_string(),
            )
        } else {
            let mut candidates = vec![args.repo_name.clone().unwrap_or_else(|| name.clone())];
            candidates.extend(args.alt_repo_names.iter().cloned());
            for candidate in &candidates {
                validate_repo_name(candidate)?;
            }
            RemoteChoice::Provision(RepoRequest {
                candidates,
                overwrite_existing: args.overwrite_existing,
                private: args.private,
                license_key: Some(license_key.clone()),
                default_branch: layout.main.to_string(),
            })
        };

        Ok(Self {
            scaffold: ScaffoldPlan {
                display_name: name.clone(),
                author: author.clone(),
                languages,
                license_key,
                starter_files: args.starter_files,
            },
            name,
            author,
            email,
            dir,
            create_dir: !args.existing,
            layout,
            remote_name: config.remote.clone(),
            command_timeout: config.command_timeout(),
            remote,
        })
    }
}

/// The project name doubles as a directory name.
pub(super) fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenesisError::UserError(
            "project name cannot be empty".to_string(),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(GenesisError::UserError(format!(
            "invalid project name '{}': it is used as a directory name and cannot be '.', '..' \
             or contain path separators",
            name
        )));
    }
    Ok(())
}

/// `<dest>/<name>`, or `<dest>` itself with `--existing`.
pub(super) fn resolve_project_dir(dest: &Path, name: &str, existing: bool) -> Result<PathBuf> {
    if existing {
        if !dest.is_dir() {
            return Err(GenesisError::UserError(format!(
                "'{}' is not an existing directory.\n\n\
                 --existing sets up the project in --dest itself; create it first or drop --existing.",
                dest.display()
            )));
        }
        return Ok(dest.to_path_buf());
    }

    let dir = dest.join(name);
    if dir.exists() && !dir.is_dir() {
        return Err(GenesisError::UserError(format!(
            "'{}' exists and is not a directory",
            dir.display()
        )));
    }
    Ok(dir)
}
