//! Boilerplate files for a new project.
//!
//! Runs between setup and finalize, on `dev`. Every file is written with
//! write-if-absent semantics, so files already in the directory win.
//!
//! Content comes from the remote provider when it can supply it, otherwise
//! from the bundled language templates or a fixed MIT fallback.

pub mod languages;


use crate::error::Result;
use crate::fs::{WriteOutcome, write_if_absent};
use crate::github::RemoteProvider;
use chrono::Datelike;
use std::path::{Path, PathBuf};

pub const GITIGNORE_HEADER: &str = "# Auto-generated .gitignore\n";

/// Ignored in every project, ahead of the language sections.
pub const GITIGNORE_COMMON: &str = "# .NET Debug and Build Outputs\n\
bin/\nobj/\n*.dll\n*.exe\n*.pdb\n*.deps.json\n*.runtimeconfig.json\n\
\n# IDE Files\n.idea/\n*.sln.iml\n";

/// What to put in the project.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    /// Title used in the README; the remote repository name when one was
    /// created.
    pub display_name: String,
    pub author: String,
    pub languages: Vec<String>,
    pub license_key: String,
    pub starter_files: bool,
}

/// Paths written and paths skipped because they already existed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ScaffoldReport {
    fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Writes boilerplate into one project directory.
pub struct Scaffolder<'a, P: RemoteProvider + ?Sized> {
    provider: &'a P,
    dir: &'a Path,
    year: i32,
}

impl<'a, P: RemoteProvider + ?Sized> Scaffolder<'a, P> {
    pub fn new(provider: &'a P, dir: &'a Path) -> Self {
        Self {
            provider,
            dir,
            year: chrono::Local::now().year(),
        }
    }

    /// Use a fixed copyright year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Write `.gitignore`, `LICENSE`, `README.md` and, if requested, the
    /// starter files of every bundled language in the plan.
    pub fn write_all(&self, plan: &ScaffoldPlan) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        self.write(&mut report, ".gitignore", || self.gitignore_text(&plan.languages))?;
        self.write(&mut report, "LICENSE", || {
            self.license_text(&plan.license_key, &plan.author)
        })?;
        self.write(&mut report, "README.md", || {
            readme_text(&plan.display_name, &plan.author)
        })?;

        if plan.starter_files {
            for name in &plan.languages {
                let Some(language) = languages::find(name) else {
                    tracing::info!(language = %name, "no starter files for language");
                    continue;
                };
                for (relative, content) in language.files {
                    self.write(&mut report, relative, || content.to_string())?;
                }
            }
        }

        Ok(report)
    }

    /// Content is only generated (and the provider only asked) when the file
    /// is missing.
    fn write(
        &self,
        report: &mut ScaffoldReport,
        relative: &str,
        content: impl FnOnce() -> String,
    ) -> Result<()> {
        let path = self.dir.join(relative);
        let outcome = if path.exists() {
            tracing::info!(path = %path.display(), "file exists; skipped");
            WriteOutcome::Skipped
        } else {
            write_if_absent(&path, &content())?
        };
        report.record(path, outcome);
        Ok(())
    }

    /// `.gitignore` content: the header and the common block, then one
    /// section per language.
    pub fn gitignore_text(&self, languages: &[String]) -> String {
        let mut text = format!("{}{}", GITIGNORE_HEADER, GITIGNORE_COMMON);

        for language in languages {
            let template = self
                .provider
                .gitignore_content(language)
                .or_else(|| languages::find(language).map(|l| l.gitignore.to_string()));

            match template {
                Some(template) => {
                    text.push_str(&format!("\n# {} specific ignore\n", language));
                    text.push_str(&template);
                    if !template.ends_with('\n') {
                        text.push('\n');
                    }
                }
                None => {
                    tracing::warn!(language = %language, "no .gitignore template found");
                    text.push_str(&format!("\n# {} (template not found)\n", language));
                }
            }
        }

        text
    }

    /// `LICENSE` content with placeholders filled, or the MIT fallback.
    pub fn license_text(&self, key: &str, author: &str) -> String {
        match self.provider.license_content(key) {
            Some(body) => body
                .replace("[year]", &self.year.to_string())
                .replace("[fullname]", author),
            None => {
                tracing::warn!(license = key, "license text unavailable; using MIT fallback");
                format!("MIT License\n\nCopyright (c) {} {}\n", self.year, author)
            }
        }
    }
}

pub fn readme_text(name: &str, author: &str) -> String {
    format!("# {}\n\nCreated by {}\n", name, author)
}
