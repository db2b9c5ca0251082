//! Embedded template bundles for project scaffolding.

/// Files shipped with the Django blank template.
pub mod django_blank {
    pub const SECRETS: &str = include_str!("templates/django_blank/secrets.yaml");
    pub const SETTINGS: &str = include_str!("templates/django_blank/settings.py");
    pub const GITIGNORE: &str = include_str!("templates/django_blank/gitignore");
    pub const SETTINGS_YAML: &str = include_str!("templates/django_blank/settings.yaml");
    pub const REQUIREMENTS: &str = include_str!("templates/django_blank/requirements.txt");

    /// Bundle members in the order the builder matches them against
    /// destination paths.
    pub const FILES: [&str; 5] = [SECRETS, SETTINGS, GITIGNORE, SETTINGS_YAML, REQUIREMENTS];
}
