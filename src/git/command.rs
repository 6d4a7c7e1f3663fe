//! Structured git commands.
//!
//! Commands are a program name plus an argument vector. Nothing is ever
//! passed through a shell, so branch names and commit messages need no
//! quoting.

use std::fmt;

/// A single git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    program: String,
    args: Vec<String>,
}

impl GitCommand {
    /// Build a `git` command from raw arguments.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "git".to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `git init`
    pub fn init() -> Self {
        Self::git(["init"])
    }

    /// `git checkout <branch>`
    pub fn checkout(branch: &str) -> Self {
        Self::git(["checkout", branch])
    }

    /// `git checkout -b <branch>`: create a branch from the current HEAD and
    /// switch to it. Fails if the branch already exists.
    pub fn create_branch(branch: &str) -> Self {
        Self::git(["checkout", "-b", branch])
    }

    /// `git add -A`
    pub fn stage_all() -> Self {
        Self::git(["add", "-A"])
    }

    /// `git commit -m <message>`, optionally with `--allow-empty`.
    pub fn commit(message: &str, allow_empty: bool) -> Self {
        let mut args = vec!["commit"];
        if allow_empty {
            args.push("--allow-empty");
        }
        args.extend(["-m", message]);
        Self::git(args)
    }

    /// `git remote add <name> <url>`
    pub fn remote_add(name: &str, url: &str) -> Self {
        Self::git(["remote", "add", name, url])
    }

    /// `git fetch <remote>`
    pub fn fetch(remote: &str) -> Self {
        Self::git(["fetch", remote])
    }

    /// `git push <remote> <branch>`, optionally with `--force`.
    pub fn push(remote: &str, branch: &str, force: bool) -> Self {
        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.extend([remote, branch]);
        Self::git(args)
    }

    /// `git merge --no-edit <branch>`
    pub fn merge(branch: &str) -> Self {
        Self::git(["merge", "--no-edit", branch])
    }

    /// `git merge --abort`
    pub fn merge_abort() -> Self {
        Self::git(["merge", "--abort"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The git subcommand (first argument), used in log lines.
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))
    }
}
