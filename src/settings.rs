use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) prefix: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let tilde = home::home_dir().unwrap();
        Self {
            prefix: tilde.join(".appstamp"),
        }
    }
}

impl Settings {
    pub(crate) fn init() -> Result<Self> {
        let path = home::home_dir()
            .expect("failed to locate user home directory")
            .join(".appstamp.config.toml");

        let settings = if !path.exists() {
            let settings = Self::default();
            let contents = toml::to_string_pretty(&settings)?;
            fs::write(path, contents)?;
            settings
        } else {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        };

        Ok(settings)
    }

    /// The bundled template tree shipped under the prefix.
    pub(crate) fn template_dir(&self) -> PathBuf {
        self.prefix.join("template")
    }
}
