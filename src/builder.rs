//! Template builders and the phase-driven build state machine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::{Environment, PythonEnv};
use crate::error::AppError;
use crate::manifest::{self, MANIFEST_FILE};
use crate::options::BuildOptions;
use crate::templates::django_blank;
use crate::token::generate_token;

/// Template identifiers with a registered builder, in prompt order.
pub const TEMPLATE_NAMES: [&str; 1] = ["django4.2-blank"];

/// Deployment stages receiving a fresh secret key.
pub const STAGES: [&str; 3] = ["development", "testing", "production"];

/// Scaffold folders created for every project.
const SCAFFOLD_FOLDERS: [&str; 5] = ["docs", "apps", "media", "static", "templates"];

const SECRET_KEY_LENGTH: usize = 100;

const DJANGO_VERSION: &str = "4.2.2";
const DYNACONF_VERSION: &str = "3.1.12";
const DRF_VERSION: &str = "3.14.0";

/// Build progress through the three sequential phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildPhase {
    Pending,
    GeneralDone,
    EnvironmentDone,
    FrameworkDone,
}

/// Capability set shared by all template builders.
pub trait TemplateBuilder {
    /// Scaffold the inner application package for the project.
    fn add_main_folder(&self) -> Result<(), AppError>;

    /// Copy the template settings files and patch them for the project.
    fn add_settings_files(&self) -> Result<(), AppError>;

    /// Current position in the phase sequence.
    fn phase(&self) -> BuildPhase;

    /// Perform the next phase and return its completion message, or `None`
    /// once the build is complete. A failing phase leaves earlier phases'
    /// artifacts in place; there is no rollback.
    fn advance(&mut self) -> Result<Option<&'static str>, AppError>;

    /// Drain the remaining phases, handing each completion message to
    /// `on_progress`.
    fn run_to_completion(&mut self, on_progress: &mut dyn FnMut(&str)) -> Result<(), AppError> {
        while let Some(message) = self.advance()? {
            on_progress(message);
        }
        Ok(())
    }
}

/// Select a builder for `template`. Unknown names fail here, before any
/// filesystem mutation.
pub fn builder_for(
    template: &str,
    env: Environment,
    options: BuildOptions,
) -> Result<Box<dyn TemplateBuilder>, AppError> {
    match template {
        "django4.2-blank" => Ok(Box::new(DjangoBlankBuilder::new(env, options))),
        unknown => Err(AppError::UnknownTemplate(unknown.to_string())),
    }
}

/// Builder for a blank Django skeleton wired to dynaconf settings.
pub struct DjangoBlankBuilder<E: PythonEnv> {
    options: BuildOptions,
    env: E,
    phase: BuildPhase,
}

impl<E: PythonEnv> DjangoBlankBuilder<E> {
    pub fn new(env: E, options: BuildOptions) -> Self {
        Self { options, env, phase: BuildPhase::Pending }
    }

    fn project_path(&self) -> &Path {
        &self.options.project_path
    }

    fn general_settings(&self) -> Result<(), AppError> {
        let path = self.project_path();

        manifest::write(&path.join(MANIFEST_FILE), &self.options.entries())?;
        add_folders(path, &SCAFFOLD_FOLDERS)?;

        if !self.options.python_version.is_empty() {
            fs::write(path.join(".python-version"), &self.options.python_version)?;
        }

        if self.options.env_file {
            fs::write(path.join(".env"), "")?;
        }
        if self.options.makefile {
            fs::write(path.join("Makefile"), "")?;
        }
        if self.options.poetry {
            fs::write(path.join("pyproject.toml"), pyproject_contents(&self.options))?;
        }

        Ok(())
    }

    fn environment_settings(&self) -> Result<(), AppError> {
        self.env.create()?;
        self.env.install("Django", Some(DJANGO_VERSION))?;
        self.env.install("dynaconf", Some(DYNACONF_VERSION))?;

        if self.options.format {
            self.env.install("black", None)?;
            self.env.install("isort", None)?;
        }
        if self.options.with_drf {
            self.env.install("djangorestframework", Some(DRF_VERSION))?;
        }

        Ok(())
    }

    fn framework_settings(&self) -> Result<(), AppError> {
        self.add_main_folder()?;
        self.add_settings_files()?;
        self.collect_static()
    }

    fn collect_static(&self) -> Result<(), AppError> {
        let command = format!(
            "cd {} && {} manage.py collectstatic",
            self.project_path().display(),
            self.env.python().display(),
        );

        self.env.run_shell(&command)
    }
}

impl<E: PythonEnv> TemplateBuilder for DjangoBlankBuilder<E> {
    fn add_main_folder(&self) -> Result<(), AppError> {
        let command = format!(
            "cd {} && {} startproject {} .",
            self.project_path().display(),
            self.env.django_admin().display(),
            self.options.project_name,
        );

        self.env.run_shell(&command)
    }

    fn add_settings_files(&self) -> Result<(), AppError> {
        let path = self.project_path();
        let secrets = path.join(".secrets.yaml");
        let settings = path.join(&self.options.project_name).join("settings.py");

        let targets = [
            secrets.clone(),
            settings.clone(),
            path.join(".gitignore"),
            path.join("settings.yaml"),
            path.join("requirements.txt"),
        ];

        for (content, target) in django_blank::FILES.iter().zip(&targets) {
            fs::write(target, content)?;
        }

        rotate_secret_keys(&secrets)?;
        set_project_name(&settings, &self.options.project_name)
    }

    fn phase(&self) -> BuildPhase {
        self.phase
    }

    fn advance(&mut self) -> Result<Option<&'static str>, AppError> {
        match self.phase {
            BuildPhase::Pending => {
                self.general_settings()?;
                self.phase = BuildPhase::GeneralDone;
                Ok(Some("General settings completed"))
            }
            BuildPhase::GeneralDone => {
                self.environment_settings()?;
                self.phase = BuildPhase::EnvironmentDone;
                Ok(Some("Environment settings completed"))
            }
            BuildPhase::EnvironmentDone => {
                self.framework_settings()?;
                self.phase = BuildPhase::FrameworkDone;
                Ok(Some("Django settings completed"))
            }
            BuildPhase::FrameworkDone => Ok(None),
        }
    }
}

fn add_folders(path: &Path, folders: &[&str]) -> Result<(), AppError> {
    for folder in folders {
        fs::create_dir_all(path.join(folder))?;
    }
    Ok(())
}

/// Rewrite the settings line carrying the empty project-name sentinel to
/// embed `project_name`. Every other line passes through unchanged, so
/// re-patching an already-patched file is a no-op.
fn set_project_name(settings: &Path, project_name: &str) -> Result<(), AppError> {
    let contents = fs::read_to_string(settings)?;

    let rewritten: String = contents
        .lines()
        .map(|line| {
            if line.contains("PROJECT_NAME = ''") {
                format!("PROJECT_NAME = '{project_name}'\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect();

    fs::write(settings, rewritten)?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct StageSecrets {
    #[serde(rename = "SECRET_KEY", default)]
    secret_key: String,
    #[serde(flatten)]
    extra: serde_yaml::Mapping,
}

/// Overwrite each stage's secret key in the copied secrets file with a
/// freshly generated token. A file that does not parse as a stage mapping
/// aborts before any token is written.
fn rotate_secret_keys(secrets_path: &Path) -> Result<(), AppError> {
    let contents = fs::read_to_string(secrets_path)?;

    let mut stages: BTreeMap<String, StageSecrets> =
        serde_yaml::from_str(&contents).map_err(|e| AppError::ParseError {
            what: "secrets file".to_string(),
            details: e.to_string(),
        })?;

    for stage in STAGES {
        let entry = stages.get_mut(stage).ok_or_else(|| AppError::ParseError {
            what: "secrets file".to_string(),
            details: format!("missing stage '{stage}'"),
        })?;
        entry.secret_key = generate_token(SECRET_KEY_LENGTH);
    }

    let rendered = serde_yaml::to_string(&stages).map_err(|e| AppError::ParseError {
        what: "secrets file".to_string(),
        details: e.to_string(),
    })?;

    fs::write(secrets_path, rendered)?;
    Ok(())
}

fn pyproject_contents(options: &BuildOptions) -> String {
    format!(
        r#"[tool.poetry]
name = "{name}"
version = "0.1.0"
description = ""
readme = "README.md"

[tool.poetry.dependencies]
python = "^{python}"

[build-system]
requires = ["poetry-core"]
build-backend = "poetry.core.masonry.api"
"#,
        name = options.project_name,
        python = options.python_version,
    )
}
