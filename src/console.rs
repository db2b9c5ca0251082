//! Console presentation for build progress and results.

use std::fs;
use std::path::Path;

use chrono::Local;
use dialoguer::Select;

use crate::builder::TEMPLATE_NAMES;
use crate::error::AppError;
use crate::manifest::MANIFEST_FILE;

/// Ask the operator to pick one of the registered templates.
pub fn ask_template() -> Result<String, AppError> {
    let selection = Select::new()
        .with_prompt("Select a template")
        .items(&TEMPLATE_NAMES)
        .default(0)
        .interact()
        .map_err(|e| AppError::config_error(format!("Template selection failed: {e}")))?;

    Ok(TEMPLATE_NAMES[selection].to_string())
}

/// Print one phase-completion line with a local timestamp.
pub fn progress_line(message: &str) {
    println!("{} {}", Local::now().format("%H:%M:%S"), message);
}

/// Echo the written manifest back and confirm the build.
pub fn final_message(project_path: &Path, project_name: &str) -> Result<(), AppError> {
    let manifest = fs::read_to_string(project_path.join(MANIFEST_FILE))?;

    print!("{manifest}");
    println!("✅ '{project_name}' configured");
    Ok(())
}
