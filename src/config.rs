//! `mutagen.toml` configuration file.
//!
//! Read after parsing the CLI arguments and locating the project directory, since
//! both of those together determine where to look for it.

use std::default::Default;
use std::fs::read_to_string;

use anyhow::Context;
use camino::Utf8Path;
use serde::Deserialize;

use crate::Result;

/// Configuration read from `mutagen.toml` at the project root.
///
/// Similar to [`crate::options::Options`], and eventually merged into it, but kept
/// separate because this one can be deserialized directly from TOML.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub examine_globs: Vec<String>,
    pub exclude_globs: Vec<String>,
    /// Operator kinds enabled for generation, by name (e.g. `"arithmetic_binary"`).
    /// Empty means "every kind not suppressed by default".
    pub operators: Vec<String>,
}

impl Config {
    pub fn read_file(path: &Utf8Path) -> Result<Config> {
        let toml = read_to_string(path).with_context(|| format!("read config {path}"))?;
        toml::de::from_str(&toml).with_context(|| format!("parse toml from {path}"))
    }

    /// Read `mutagen.toml` (falling back to `.mutagen.toml`) from a project
    /// directory, or an empty default [`Config`] if neither exists.
    pub fn read_tree_config(project_dir: &Utf8Path) -> Result<Config> {
        for name in ["mutagen.toml", ".mutagen.toml"] {
            let path = project_dir.join(name);
            if path.exists() {
                return Config::read_file(&path);
            }
        }
        Ok(Config::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_yields_default() {
        let dir = tempdir().unwrap();
        let project_dir = Utf8Path::from_path(dir.path()).unwrap();
        assert_eq!(Config::read_tree_config(project_dir).unwrap(), Config::default());
    }

    #[test]
    fn parses_examine_and_exclude_globs() {
        let dir = tempdir().unwrap();
        let project_dir = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(
            project_dir.join("mutagen.toml"),
            indoc! {r#"
                examine_globs = ["src/**/*.rs"]
                exclude_globs = ["src/generated/**"]
                operators = ["arithmetic_binary", "conditional_binary"]
            "#},
        )
        .unwrap();
        let config = Config::read_tree_config(project_dir).unwrap();
        assert_eq!(config.examine_globs, vec!["src/**/*.rs"]);
        assert_eq!(config.exclude_globs, vec!["src/generated/**"]);
        assert_eq!(config.operators, vec!["arithmetic_binary", "conditional_binary"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempdir().unwrap();
        let project_dir = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(project_dir.join("mutagen.toml"), "bogus_field = true\n").unwrap();
        assert!(Config::read_tree_config(project_dir).is_err());
    }
}
