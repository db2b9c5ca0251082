//! Build manifest serialization.

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::options::OptionValue;

/// Fixed manifest file name at the project root.
pub const MANIFEST_FILE: &str = "pyforge.toml";

/// Write the selected options as `key = value` lines, one per entry, in the
/// given order. Unset options (empty strings, disabled flags) are omitted.
/// The destination is always fully overwritten, never merged.
pub fn write(path: &Path, entries: &[(&str, OptionValue)]) -> Result<(), AppError> {
    let mut contents = String::new();

    for (key, value) in entries {
        if !value.is_set() {
            continue;
        }

        let rendered = match value {
            OptionValue::Text(text) => toml::Value::String(text.clone()).to_string(),
            OptionValue::Flag(flag) => toml::Value::Boolean(*flag).to_string(),
        };

        contents.push_str(&format!("{key} = {rendered}\n"));
    }

    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unset_entries_are_omitted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let entries = [
            ("a", OptionValue::Text("x".to_string())),
            ("b", OptionValue::Text(String::new())),
            ("c", OptionValue::Flag(true)),
            ("d", OptionValue::Flag(false)),
        ];
        write(&path, &entries).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a = \"x\"\nc = true\n");
    }

    #[test]
    fn entries_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let entries = [
            ("zeta", OptionValue::Text("1".to_string())),
            ("alpha", OptionValue::Text("2".to_string())),
        ];
        write(&path, &entries).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let keys: Vec<&str> =
            contents.lines().map(|line| line.split_once(" = ").unwrap().0).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn output_is_parseable_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let entries = [
            ("project_name", OptionValue::Text("demo".to_string())),
            ("format", OptionValue::Flag(true)),
        ];
        write(&path, &entries).unwrap();

        let parsed: toml::Value = fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(parsed["project_name"].as_str(), Some("demo"));
        assert_eq!(parsed["format"].as_bool(), Some(true));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let entries = [("name", OptionValue::Text("de\"mo".to_string()))];
        write(&path, &entries).unwrap();

        let parsed: toml::Value = fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(parsed["name"].as_str(), Some("de\"mo"));
    }

    #[test]
    fn existing_manifest_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, "stale = \"contents\"\n").unwrap();

        let entries = [("fresh", OptionValue::Text("yes".to_string()))];
        write(&path, &entries).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "fresh = \"yes\"\n");
    }
}
