//! Repository configuration: an optional `.kit/config` key=value file
//! holding ambient preferences that don't change object/ref semantics.

use std::path::Path;

use crate::error::Result;
use crate::infra::read_file;

const DEFAULT_BRANCH: &str = "main";

/// Parsed `.kit/config` contents. A missing file is not an error — it
/// simply means every setting takes its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    default_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl Config {
    /// Reads `repo_dir/config`, falling back to defaults if it is absent.
    pub fn load(repo_dir: &Path) -> Result<Self> {
        let path = repo_dir.join("config");
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = read_file(&path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&content)))
    }

    fn parse(content: &str) -> Self {
        let mut config = Config::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                if key == "default_branch" && !value.is_empty() {
                    config.default_branch = value.to_string();
                }
            }
        }
        config
    }

    /// The preferred default branch name, for a future CLI layer to read
    /// before calling `Repository::init`; the core does not consult this
    /// itself.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }
}
