use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context as _, Result};
use clap::Args;
use console::style;

use appstamp::config::TemplateConfig;
use appstamp::template::{EntryKind, TemplateSet};

use crate::progress;
use crate::prompt;
use crate::App;

#[derive(Clone, Args)]
pub(crate) struct Bootstrap {
    #[arg(help = "Destination directory to bootstrap the app into.", default_value = ".")]
    root: PathBuf,

    #[arg(
        short = 't',
        long = "template",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Set a template option and skip the configuration prompts.",
    )]
    template: Vec<(String, String)>,
}

impl App {
    pub(crate) fn bootstrap(&self) -> Result<()> {
        let args = &self.cli.bootstrap;

        progress::banner(&args.root);

        let defaults = default_template_config(&args.root);
        let mut config = if args.template.is_empty() {
            prompt_template_config(&defaults).context("failed to prompt for configuration")?
        } else {
            let mut config = defaults;
            config.apply(&args.template)?;
            config
        };
        config.finalize(env!("CARGO_PKG_VERSION"));

        progress::creating_files();

        let template_dir = self.settings.template_dir();
        let set = TemplateSet::load(&template_dir).context(format!(
            "failed to load template from {}",
            template_dir.display()
        ))?;

        generate_files(&set, &config, &args.root, |path| {
            let question = format!("Overwrite '{}'?", path.display());
            if prompt::confirm(question, None)? {
                Ok(Resolution::Overwrite)
            } else {
                Ok(Resolution::Skip)
            }
        })?;

        progress::creating_done();

        // An install failure leaves the generated files in place; the step
        // can be rerun by hand, so it is reported without failing the run.
        let spinner = progress::install_spinner();
        match install_dependencies(&args.root) {
            Ok(()) => progress::install_done(spinner),
            Err(err) => progress::install_failed(spinner, &format!("{err:#}")),
        }

        progress::finish();

        Ok(())
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Populates the built-in defaults, then best-effort enriches them from the
/// directory's `origin` remote. Any failure to resolve the remote keeps the
/// defaults unchanged.
fn default_template_config(dir: &Path) -> TemplateConfig {
    let mut config = TemplateConfig::defaults();
    if let Ok(Some(url)) = crate::git::remote_url(dir, "origin") {
        config.derive_from_remote(&url);
    }
    config
}

const PROMPT_FIELDS: [(&str, &str); 4] = [
    ("Name", "name"),
    ("Repository", "repository"),
    ("Description", "description"),
    ("License", "license"),
];

fn prompt_template_config(defaults: &TemplateConfig) -> Result<TemplateConfig> {
    print!(
        "Your app's configuration is:\n\n{}\n",
        template_config_to_string(defaults)
    );

    if !prompt::confirm("Would you like to change its configuration?", Some(false))? {
        return Ok(defaults.clone());
    }

    println!();
    let mut config = defaults.clone();
    for (label, key) in PROMPT_FIELDS {
        let default = defaults.get(key).map(str::to_string);
        let answer = prompt::input(style(label).bold().to_string(), default)?;
        config.set(key, answer);
    }
    Ok(config)
}

fn template_config_to_string(config: &TemplateConfig) -> String {
    let mut out = Vec::new();
    for (key, value) in config.iter() {
        out.push(format!("{}: {value}", style(upper_first(key)).bold()));
    }
    out.join("\n") + "\n"
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Overwrite,
    Skip,
}

/// Materializes the template set under `root` in a single pass: render,
/// resolve any conflict with a pre-existing file, write. An existing file
/// is never overwritten without going through the resolver.
pub(crate) fn generate_files<F>(
    set: &TemplateSet,
    config: &TemplateConfig,
    root: &Path,
    mut resolve: F,
) -> Result<(u32, u32, u32)>
where
    F: FnMut(&Path) -> Result<Resolution>,
{
    let (mut creates, mut overwrites, mut skips) = (0, 0, 0);
    fs::create_dir_all(root).context(format!(
        "failed to create destination directory: '{}'",
        root.display()
    ))?;

    for entry in set.entries() {
        let dst = root.join(&entry.target);
        if entry.kind == EntryKind::Directory {
            fs::create_dir_all(&dst).context(format!(
                "failed to create directory: '{}'",
                dst.display()
            ))?;
            continue;
        }

        let contents = set.render(entry, config).context(format!(
            "failed to render template file: '{}'",
            entry.target.display()
        ))?;

        if dst.exists() {
            match resolve(&entry.target)? {
                Resolution::Overwrite => {
                    fs::write(&dst, contents)
                        .context(format!("failed to write file: '{}'", dst.display()))?;
                    overwrites += 1;
                    progress::file_written(&entry.target);
                }
                Resolution::Skip => {
                    skips += 1;
                    progress::file_skipped(&entry.target);
                }
            }
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).context(format!(
                    "failed to create directory: '{}'",
                    parent.display()
                ))?;
            }
            fs::write(&dst, contents)
                .context(format!("failed to write file: '{}'", dst.display()))?;
            creates += 1;
            progress::file_written(&entry.target);
        }
    }

    Ok((creates, overwrites, skips))
}

fn install_dependencies(root: &Path) -> Result<()> {
    let command = Command::new("npm")
        .arg("install")
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .context("failed to execute npm install command")?;

    if !command.status.success() {
        let stderr = String::from_utf8_lossy(&command.stderr);
        bail!("npm install exited with {}: {}", command.status, stderr.trim());
    }

    Ok(())
}
