//! Defines [`Config`], the naming conventions that drive classification and
//! composition, along with loading it from a `trellis.yaml` project file.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "trellis.yaml";

const DEFAULT_EXTENSION: &str = ".html";
const DEFAULT_INCLUDES_DIR: &str = "includes";
const DEFAULT_LAYOUT: &str = "layout";

/// What to do when a layout or page fails to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Abort the load, reporting the affected page key.
    Strict,

    /// Skip the failing fragment with a warning and register the page with
    /// whatever did parse.
    Lenient,
}

impl Default for ParseMode {
    fn default() -> Self {
        ParseMode::Strict
    }
}

/// The naming conventions of a template tree. Empty fields fall back to their
/// defaults (see [`Config::normalized`]).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The extension of template files, including the leading dot. Defaults
    /// to `.html`.
    pub extension: String,

    /// The name of directories holding reusable includes. Defaults to
    /// `includes`.
    pub includes_dir: String,

    /// The base name of layout files. Defaults to `layout`, so layouts are
    /// files named `layout.html`.
    pub layout: String,

    /// The name under which each composed template is executed. Defaults to
    /// the layout file name.
    pub entry: Option<String>,

    /// How layout and page parse failures are handled.
    pub mode: ParseMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extension: DEFAULT_EXTENSION.to_owned(),
            includes_dir: DEFAULT_INCLUDES_DIR.to_owned(),
            layout: DEFAULT_LAYOUT.to_owned(),
            entry: None,
            mode: ParseMode::default(),
        }
    }
}

impl Config {
    /// Builds a configuration from the three naming conventions. Empty values
    /// take their defaults.
    pub fn new(extension: &str, includes_dir: &str, layout: &str) -> Config {
        Config {
            extension: extension.to_owned(),
            includes_dir: includes_dir.to_owned(),
            layout: layout.to_owned(),
            ..Config::default()
        }
        .normalized()
    }

    pub fn with_entry(mut self, entry: &str) -> Config {
        self.entry = Some(entry.to_owned());
        self.normalized()
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Config {
        self.mode = mode;
        self
    }

    /// Replaces empty fields with their defaults.
    pub fn normalized(mut self) -> Config {
        fn or_default(value: &mut String, default: &str) {
            if value.trim().is_empty() {
                *value = default.to_owned();
            }
        }
        or_default(&mut self.extension, DEFAULT_EXTENSION);
        or_default(&mut self.includes_dir, DEFAULT_INCLUDES_DIR);
        or_default(&mut self.layout, DEFAULT_LAYOUT);
        if let Some(entry) = &self.entry {
            if entry.trim().is_empty() {
                self.entry = None;
            }
        }
        self
    }

    /// The file name that marks a layout, e.g. `layout.html`.
    pub fn layout_file_name(&self) -> String {
        format!("{}{}", self.layout, self.extension)
    }

    /// The name under which composed templates are executed.
    pub fn entry_name(&self) -> String {
        match &self.entry {
            Some(entry) => entry.clone(),
            None => self.layout_file_name(),
        }
    }

    /// Looks for [`PROJECT_FILE`] in `dir` and each of its ancestors, loading
    /// the first one found. Falls back to the defaults if there is none.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(dir) = current {
            let path = dir.join(PROJECT_FILE);
            if path.exists() {
                return Config::from_file(&path)
                    .map_err(|e| anyhow!("Loading configuration: {:?}", e));
            }
            current = dir.parent();
        }
        log::debug!(
            "no `{}` found above `{}`; using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Ok(Config::default())
    }

    /// Loads a project file. An empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = crate::util::read_file(path, "project")?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config.normalized())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extension, ".html");
        assert_eq!(config.includes_dir, "includes");
        assert_eq!(config.layout, "layout");
        assert_eq!(config.layout_file_name(), "layout.html");
        assert_eq!(config.entry_name(), "layout.html");
        assert_eq!(config.mode, ParseMode::Strict);
    }

    #[test]
    fn test_empty_fields_take_defaults() {
        let config = Config::new("", "partials", "");
        assert_eq!(config.extension, ".html");
        assert_eq!(config.includes_dir, "partials");
        assert_eq!(config.layout_file_name(), "layout.html");
        assert_eq!(Config::default().with_entry(" ").entry, None);
    }

    #[test]
    fn test_explicit_entry() {
        let config = Config::new(".tmpl", "includes", "base").with_entry("main");
        assert_eq!(config.layout_file_name(), "base.tmpl");
        assert_eq!(config.entry_name(), "main");
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "includes_dir: partials\nlayout: base\nmode: lenient\n")?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.extension, ".html");
        assert_eq!(config.includes_dir, "partials");
        assert_eq!(config.layout, "base");
        assert_eq!(config.mode, ParseMode::Lenient);
        Ok(())
    }

    #[test]
    fn test_from_directory_searches_ancestors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(PROJECT_FILE), "extension: .tmpl\n")?;
        let nested = dir.path().join("views").join("admin");
        std::fs::create_dir_all(&nested)?;

        assert_eq!(Config::from_directory(&nested)?.extension, ".tmpl");
        Ok(())
    }

    #[test]
    fn test_from_file_rejects_unknown_mode() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "mode: sloppy\n")?;
        assert!(Config::from_file(&path).is_err());
        Ok(())
    }
}
