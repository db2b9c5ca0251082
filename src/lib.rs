//! pyforge: bootstrap Python project directories with a virtualenv, pinned
//! dependencies, and a templated Django skeleton.

pub mod builder;
pub mod console;
pub mod director;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod options;
pub mod templates;
pub mod token;

pub use builder::{BuildPhase, TemplateBuilder, TEMPLATE_NAMES};
pub use director::Director;
pub use environment::{Environment, PythonEnv};
pub use error::AppError;
pub use manifest::MANIFEST_FILE;
pub use options::{BuildOptions, OptionValue};
pub use token::generate_token;

/// Run one full build, handing each phase-completion message to `on_progress`.
pub fn build(options: BuildOptions, on_progress: &mut dyn FnMut(&str)) -> Result<(), AppError> {
    Director::new(options)?.run(on_progress)
}
