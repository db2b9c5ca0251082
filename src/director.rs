//! Build orchestration: owns the environment and the selected template builder.

use crate::builder::{self, BuildPhase, TemplateBuilder};
use crate::environment::Environment;
use crate::error::AppError;
use crate::options::BuildOptions;

/// Drives one project build from option validation to the final phase.
pub struct Director {
    builder: Box<dyn TemplateBuilder>,
}

impl Director {
    /// Validate the options, look up the project's environment, and select
    /// the template builder. Fails before any filesystem mutation when the
    /// options are invalid or the template name is not registered.
    pub fn new(options: BuildOptions) -> Result<Self, AppError> {
        options.validate()?;

        let env = Environment::new(&options.project_path);
        let template = options.template.clone();
        let builder = builder::builder_for(&template, env, options)?;

        Ok(Self { builder })
    }

    /// Current position in the phase sequence.
    pub fn phase(&self) -> BuildPhase {
        self.builder.phase()
    }

    /// Perform the next phase, returning its completion message, or `None`
    /// once the build is complete.
    pub fn advance(&mut self) -> Result<Option<&'static str>, AppError> {
        self.builder.advance()
    }

    /// Run every remaining phase, handing completion messages to `on_progress`.
    pub fn run(&mut self, on_progress: &mut dyn FnMut(&str)) -> Result<(), AppError> {
        self.builder.run_to_completion(on_progress)
    }
}
