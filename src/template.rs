use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use glob::Pattern;
use minijinja::Environment;
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::utils::{self, Result};

/// The runtime worker script is copied verbatim by the offline tooling and
/// must never go through the substitution pass, so it is excluded from the
/// set entirely.
const WORKER_TEMPLATE: &str = "app/offline-worker.js";

/// Base names that cannot ship with a leading dot inside a published
/// package; the dot is restored on generation.
const RESERVED_NAMES: [&str; 2] = ["gitignore", "nojekyll"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Text,
    Binary,
}

pub struct Entry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: EntryKind,
}

pub struct TemplateSet {
    pub root: PathBuf,
    entries: Vec<Entry>,
    environment: Environment<'static>,
}

impl TemplateSet {
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = fs::canonicalize(&root)?;
        let exclude = Pattern::new(WORKER_TEMPLATE).unwrap();

        let mut entries = Vec::new();
        let mut environment = Environment::new();
        environment.add_function("year", || chrono::Local::now().year().to_string());

        let walker = WalkDir::new(&root).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|err| err.into_io_error().unwrap())?;
            let path = entry.path().strip_prefix(&root).unwrap();
            if path.as_os_str().is_empty() || exclude.matches_path(path) {
                continue;
            }
            let target = normalize_target(path);
            if entry.file_type().is_dir() {
                entries.push(Entry {
                    source: entry.path().to_path_buf(),
                    target,
                    kind: EntryKind::Directory,
                });
            } else if entry.file_type().is_file() {
                let buf = fs::read(entry.path())?;
                let kind = if utils::is_binary_buf(&buf) {
                    EntryKind::Binary
                } else {
                    match String::from_utf8(buf) {
                        Ok(source) => {
                            environment.add_template_owned(utils::path_to_string(&target), source)?;
                            EntryKind::Text
                        }
                        // Undecodable content is treated like any other
                        // non-text file and copied untouched.
                        Err(_) => EntryKind::Binary,
                    }
                };
                entries.push(Entry {
                    source: entry.path().to_path_buf(),
                    target,
                    kind,
                });
            }
        }

        Ok(Self {
            root,
            entries,
            environment,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Produces the destination contents of a file entry: text entries are
    /// rendered with the configuration as context, binary entries are read
    /// back verbatim.
    pub fn render(&self, entry: &Entry, config: &TemplateConfig) -> Result<Vec<u8>> {
        match entry.kind {
            EntryKind::Directory => unreachable!("directory entries have no contents"),
            EntryKind::Text => {
                let name = utils::path_to_string(&entry.target);
                let template = self.environment.get_template(&name)?;
                Ok(template.render(config)?.into_bytes())
            }
            EntryKind::Binary => Ok(fs::read(&entry.source)?),
        }
    }
}

fn normalize_target(path: &Path) -> PathBuf {
    match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) if RESERVED_NAMES.contains(&stem) => {
            let name = utils::path_to_string(path.file_name().unwrap());
            path.with_file_name(format!(".{name}"))
        }
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO_BYTES: [u8; 6] = [0x89, 0x50, 0x4e, 0x47, 0x00, 0x1a];

    fn scaffold(root: &Path) {
        fs::create_dir_all(root.join("app")).unwrap();
        fs::write(root.join("README.md"), "# {{ name }}\n\n{{ description }}\n").unwrap();
        fs::write(root.join("gitignore"), "node_modules/\n").unwrap();
        fs::write(root.join("nojekyll"), "").unwrap();
        fs::write(
            root.join("package.json"),
            "{\n  \"name\": \"{{ name }}\",\n  \"license\": \"{{ license }}\"\n}\n",
        )
        .unwrap();
        fs::write(root.join("app").join("offline-worker.js"), "// worker\n").unwrap();
        fs::write(root.join("app").join("logo.png"), LOGO_BYTES).unwrap();
    }

    fn find<'a>(set: &'a TemplateSet, target: &str) -> &'a Entry {
        set.entries()
            .iter()
            .find(|entry| entry.target == Path::new(target))
            .unwrap_or_else(|| panic!("no entry for '{target}'"))
    }

    #[test]
    fn excludes_the_worker_script() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let set = TemplateSet::load(dir.path()).unwrap();
        assert!(set
            .entries()
            .iter()
            .all(|entry| entry.target != Path::new(WORKER_TEMPLATE)));
    }

    #[test]
    fn reserved_names_are_dot_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let set = TemplateSet::load(dir.path()).unwrap();
        find(&set, ".gitignore");
        find(&set, ".nojekyll");
        assert!(set
            .entries()
            .iter()
            .all(|entry| entry.target != Path::new("gitignore")));
    }

    #[test]
    fn binary_files_pass_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let set = TemplateSet::load(dir.path()).unwrap();
        let logo = find(&set, "app/logo.png");
        assert_eq!(logo.kind, EntryKind::Binary);
        let rendered = set.render(logo, &TemplateConfig::defaults()).unwrap();
        assert_eq!(rendered, LOGO_BYTES);
    }

    #[test]
    fn renders_configuration_values_into_text_files() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let set = TemplateSet::load(dir.path()).unwrap();
        let readme = find(&set, "README.md");
        assert_eq!(readme.kind, EntryKind::Text);
        let rendered = set.render(readme, &TemplateConfig::defaults()).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("# appstamp-template-app"));
        assert!(rendered.contains("A template app bootstrapped with appstamp."));
    }

    #[test]
    fn directories_are_enumerated_before_their_files() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let set = TemplateSet::load(dir.path()).unwrap();
        let positions = set
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.target.starts_with("app"))
            .map(|(index, entry)| (index, entry.kind))
            .collect::<Vec<_>>();
        assert_eq!(positions.first().unwrap().1, EntryKind::Directory);
    }

    #[test]
    fn missing_template_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TemplateSet::load(dir.path().join("absent")).is_err());
    }
}
