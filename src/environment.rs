//! Virtualenv discovery, creation, and command execution scoped to one project.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::AppError;

/// Conventional virtualenv directory names, in detection order.
pub const VENV_NAMES: [&str; 3] = [".venv", "venv", "env"];

/// Directory name used when no existing environment is found.
pub const DEFAULT_VENV: &str = ".venv";

/// Operations the template builders need from a Python environment.
///
/// `Environment` is the production implementation; tests substitute a
/// recording fake so builds can be exercised without a Python toolchain.
pub trait PythonEnv {
    /// Materialize the environment if missing and upgrade its installer toolchain.
    fn create(&self) -> Result<(), AppError>;

    /// Install a package, pinned to its compatible minor series when a version is given.
    fn install(&self, package: &str, version: Option<&str>) -> Result<(), AppError>;

    /// Run an arbitrary shell command, discarding stdout and failing on non-zero exit.
    fn run_shell(&self, command: &str) -> Result<(), AppError>;

    /// Path to the environment's Python interpreter.
    fn python(&self) -> PathBuf;

    /// Path to the environment's django-admin entry point.
    fn django_admin(&self) -> PathBuf;
}

/// An isolated Python installation rooted inside one project directory.
#[derive(Debug, Clone)]
pub struct Environment {
    venv_path: PathBuf,
    windows: bool,
}

impl Environment {
    /// Look up the environment for a project. Non-destructive: nothing is
    /// created until [`PythonEnv::create`] runs.
    pub fn new(project_path: &Path) -> Self {
        let name = detect_environment(project_path);
        Self { venv_path: project_path.join(name), windows: cfg!(windows) }
    }

    /// Root directory of the virtualenv.
    pub fn venv_path(&self) -> &Path {
        &self.venv_path
    }

    /// Path to the environment's pip executable.
    pub fn pip(&self) -> PathBuf {
        executable_path(&self.venv_path, "pip", self.windows)
    }

    fn run(&self, program: &Path, args: &[&str]) -> Result<(), AppError> {
        let rendered = format!("{} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .output()
            .map_err(|e| AppError::CommandFailed {
                command: rendered.clone(),
                details: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed {
                command: rendered,
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(())
    }
}

impl PythonEnv for Environment {
    fn create(&self) -> Result<(), AppError> {
        if !self.venv_path.exists() {
            let python = if self.windows { "python" } else { "python3" };
            let venv = self.venv_path.display().to_string();
            self.run(Path::new(python), &["-m", "venv", &venv])?;
        }

        // The bundled pip is often stale; upgrade it even for pre-existing environments.
        self.run(&self.pip(), &["install", "-U", "pip", "setuptools"])
    }

    fn install(&self, package: &str, version: Option<&str>) -> Result<(), AppError> {
        let requirement = match version {
            Some(version) => {
                let (min, next) = compatible_range(version)?;
                format!("{package}>={min},<{next}")
            }
            None => package.to_string(),
        };

        self.run(&self.pip(), &["install", &requirement])
    }

    fn run_shell(&self, command: &str) -> Result<(), AppError> {
        let (shell, flag) = if self.windows { ("cmd", "/C") } else { ("sh", "-c") };

        let output = Command::new(shell)
            .arg(flag)
            .arg(command)
            .stdout(Stdio::null())
            .output()
            .map_err(|e| AppError::CommandFailed {
                command: command.to_string(),
                details: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed {
                command: command.to_string(),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(())
    }

    fn python(&self) -> PathBuf {
        executable_path(&self.venv_path, "python", self.windows)
    }

    fn django_admin(&self) -> PathBuf {
        executable_path(&self.venv_path, "django-admin", self.windows)
    }
}

/// Return the first conventional virtualenv directory that exists under
/// `project_path`, or [`DEFAULT_VENV`] when none does. Creates nothing.
pub fn detect_environment(project_path: &Path) -> &'static str {
    VENV_NAMES
        .iter()
        .find(|name| project_path.join(name).is_dir())
        .copied()
        .unwrap_or(DEFAULT_VENV)
}

/// Shape an executable path for the host OS flavor: Windows virtualenvs keep
/// suffixed binaries under `Scripts`, everything else uses `bin`.
pub(crate) fn executable_path(venv: &Path, name: &str, windows: bool) -> PathBuf {
    if windows {
        venv.join("Scripts").join(format!("{name}.exe"))
    } else {
        venv.join("bin").join(name)
    }
}

/// Compute the half-open version range pinning `version` to its minor series:
/// `"4.2.2"` becomes `("4.2.2", "4.3")`.
///
/// Requires exactly three numeric dot-separated components.
pub(crate) fn compatible_range(version: &str) -> Result<(String, String), AppError> {
    let components: Vec<u32> = version
        .split('.')
        .map(|part| part.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| AppError::InvalidVersion(version.to_string()))?;

    let [major, minor, _patch] = components[..] else {
        return Err(AppError::InvalidVersion(version.to_string()));
    };

    Ok((version.to_string(), format!("{major}.{}", minor + 1)))
}
