//! Implementation of the `codegenesis templates` command.

use crate::cli::{TemplateKind, TemplatesArgs};
use crate::config::{Config, Credentials, OWNER_VAR, TOKEN_VAR};
use crate::error::{GenesisError, Result};
use crate::github::{GitHubClient, RemoteProvider};

/// Execute the `codegenesis templates` command.
pub fn cmd_templates(args: TemplatesArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        GenesisError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    let config = Config::resolve(args.config.as_deref(), &cwd)?;
    let client = GitHubClient::from_config(&config, Credentials::from_env());

    if !client.is_available() {
        eprintln!(
            "GitHub credentials are not set; export {} and {} (or put them in .env).",
            TOKEN_VAR, OWNER_VAR
        );
        return Ok(());
    }

    let lines = template_lines(&client, args.kind);
    if lines.is_empty() {
        eprintln!("No templates returned.");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// One line per template: the gitignore name, or the license key and name.
pub fn template_lines<P: RemoteProvider + ?Sized>(provider: &P, kind: TemplateKind) -> Vec<String> {
    match kind {
        TemplateKind::Gitignore => provider.gitignore_templates(),
        TemplateKind::Licenses => provider
            .license_templates()
            .into_iter()
            .map(|t| format!("{:<16} {}", t.key, t.name))
            .collect(),
    }
}
