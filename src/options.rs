//! Build options collected from the CLI.

use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

/// A single manifest-serializable option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
}

impl OptionValue {
    /// Whether the value survives manifest filtering: empty strings and
    /// disabled flags are treated as unset.
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Text(text) => !text.is_empty(),
            OptionValue::Flag(flag) => *flag,
        }
    }
}

/// Options for one project build, constructed once from CLI input.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub project_name: String,
    pub project_path: PathBuf,
    pub python_version: String,
    pub template: String,
    /// Install black and isort into the environment.
    pub format: bool,
    /// Install Django REST framework.
    pub with_drf: bool,
    /// Write a .env file at the project root.
    pub env_file: bool,
    /// Write an empty Makefile at the project root.
    pub makefile: bool,
    /// Write a Poetry pyproject.toml for the project.
    pub poetry: bool,
}

impl BuildOptions {
    /// Manifest entries in their fixed serialization order. The project path
    /// is flattened to its string form.
    pub fn entries(&self) -> Vec<(&'static str, OptionValue)> {
        vec![
            ("project_name", OptionValue::Text(self.project_name.clone())),
            ("project_path", OptionValue::Text(self.project_path.display().to_string())),
            ("python_version", OptionValue::Text(self.python_version.clone())),
            ("template", OptionValue::Text(self.template.clone())),
            ("format", OptionValue::Flag(self.format)),
            ("with_drf", OptionValue::Flag(self.with_drf)),
            ("env_file", OptionValue::Flag(self.env_file)),
            ("makefile", OptionValue::Flag(self.makefile)),
            ("poetry", OptionValue::Flag(self.poetry)),
        ]
    }

    /// Check the option invariants: the target directory must exist and the
    /// project name must be usable as a single path segment.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.project_path.is_dir() {
            return Err(AppError::ProjectPathNotFound(self.project_path.clone()));
        }

        if !is_valid_project_name(&self.project_name) {
            return Err(AppError::InvalidProjectName(self.project_name.clone()));
        }

        Ok(())
    }
}

fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        && Path::new(name).components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> BuildOptions {
        BuildOptions {
            project_name: "demo".to_string(),
            project_path: dir.path().to_path_buf(),
            python_version: "3.11".to_string(),
            template: "django4.2-blank".to_string(),
            format: false,
            with_drf: false,
            env_file: false,
            makefile: false,
            poetry: false,
        }
    }

    #[test]
    fn entries_keep_a_stable_order() {
        let dir = TempDir::new().unwrap();
        let keys: Vec<&str> = options(&dir).entries().into_iter().map(|(key, _)| key).collect();

        assert_eq!(
            keys,
            [
                "project_name",
                "project_path",
                "python_version",
                "template",
                "format",
                "with_drf",
                "env_file",
                "makefile",
                "poetry",
            ]
        );
    }

    #[test]
    fn entries_flatten_the_project_path() {
        let dir = TempDir::new().unwrap();
        let entries = options(&dir).entries();

        let (_, path_value) = entries.iter().find(|(key, _)| *key == "project_path").unwrap();
        assert_eq!(path_value, &OptionValue::Text(dir.path().display().to_string()));
    }

    #[test]
    fn validate_accepts_existing_directory() {
        let dir = TempDir::new().unwrap();
        options(&dir).validate().unwrap();
    }

    #[test]
    fn validate_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir);
        opts.project_path = dir.path().join("absent");

        assert!(matches!(opts.validate(), Err(AppError::ProjectPathNotFound(_))));
    }

    #[test]
    fn validate_rejects_path_separators_in_name() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir);
        opts.project_name = "demo/evil".to_string();

        assert!(matches!(opts.validate(), Err(AppError::InvalidProjectName(_))));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir);
        opts.project_name = String::new();

        assert!(matches!(opts.validate(), Err(AppError::InvalidProjectName(_))));
    }

    #[test]
    fn unset_values_are_not_considered_set() {
        assert!(!OptionValue::Text(String::new()).is_set());
        assert!(!OptionValue::Flag(false).is_set());
        assert!(OptionValue::Text("x".to_string()).is_set());
        assert!(OptionValue::Flag(true).is_set());
    }
}
