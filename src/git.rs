use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Reads the URL of the named remote configured for `dir`. A missing git
/// installation, a directory that is not a repository, or an unset remote
/// all yield `None` rather than an error.
pub(crate) fn remote_url(dir: impl AsRef<Path>, remote: &str) -> Result<Option<String>> {
    if !check_git_installed()? {
        return Ok(None);
    }

    let command = Command::new("git")
        .arg("config")
        .arg("--get")
        .arg(format!("remote.{remote}.url"))
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .context("failed to execute git config command")?;

    let url = if command.status.success() {
        let output = String::from_utf8(command.stdout)
            .expect("command output encoding should be utf-8")
            .trim()
            .to_string();
        (!output.is_empty()).then_some(output)
    } else {
        None
    };

    Ok(url)
}

fn check_git_installed() -> Result<bool> {
    let check = Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to check if git is installed")?;
    Ok(check.success())
}
