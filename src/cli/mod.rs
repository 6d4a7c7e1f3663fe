//! CLI argument parsing for codegenesis.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Codegenesis: start a project on a main/dev/staging git topology.
///
/// `main` and `staging` hold only empty commits, the boilerplate lands on
/// `dev` and is merged into every feature branch. With `--github` the
/// repository is created on GitHub and every branch is pushed.
#[derive(Parser, Debug)]
#[command(name = "codegenesis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for codegenesis.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project.
    ///
    /// Initializes the repository, builds the branch skeleton, writes
    /// `.gitignore`, `LICENSE` and `README.md` on `dev` and spreads them to
    /// the feature branches.
    New(NewArgs),

    /// List the templates GitHub offers.
    ///
    /// Requires GITHUB_PAT and GITHUB_USERNAME; prints nothing without them.
    Templates(TemplatesArgs),
}

/// Arguments for the `new` command.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Project name; also the directory name and the default repository name.
    pub name: String,

    /// Author named in the LICENSE and README and used for commits.
    #[arg(short, long)]
    pub author: String,

    /// Email for the commits (overrides `git_user_email` from the config).
    #[arg(long)]
    pub email: Option<String>,

    /// Directory the project is created in.
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,

    /// Use `--dest` itself as the project directory instead of
    /// `<dest>/<name>`.
    #[arg(long)]
    pub existing: bool,

    /// Language for `.gitignore` (repeatable).
    #[arg(short, long = "language", value_name = "LANG")]
    pub languages: Vec<String>,

    /// License template key (e.g. mit, apache-2.0).
    #[arg(long)]
    pub license: Option<String>,

    /// Feature branch to create from dev (repeatable).
    #[arg(short, long = "branch", value_name = "NAME")]
    pub branches: Vec<String>,

    /// Create the repository on GitHub and push every branch.
    #[arg(long)]
    pub github: bool,

    /// Make the GitHub repository private.
    #[arg(long, requires = "github")]
    pub private: bool,

    /// GitHub repository name (default: the project name).
    #[arg(long, requires = "github")]
    pub repo_name: Option<String>,

    /// Name to try when the previous one is taken (repeatable).
    #[arg(long = "alt-repo-name", value_name = "NAME", requires = "github")]
    pub alt_repo_names: Vec<String>,

    /// Delete an existing repository with the chosen name and recreate it.
    #[arg(long, requires = "github")]
    pub overwrite_existing: bool,

    /// Also write starter source files for the bundled languages.
    #[arg(long)]
    pub starter_files: bool,

    /// Config file (default: ./codegenesis.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `templates` command.
#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Which templates to list.
    #[arg(value_enum)]
    pub kind: TemplateKind,

    /// Config file (default: ./codegenesis.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Gitignore,
    Licenses,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
