use crate::config::{Config, ConfigError, OverlayDefaults};
use schemars::{schema_for, Schema};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

const HEADER: &str = "# FullScreenOverlay Configuration File\n# Read when a page is built\n\n\n";

/// Write `config` as YAML with each documented field preceded by its description
pub fn serialize_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let yaml_string = serde_yaml::to_string(config)?;

    let mut field_docs = HashMap::new();
    let config_schema = schema_for!(Config);
    extract_field_documentation(&config_schema, "", &mut field_docs);

    let defaults_schema = schema_for!(OverlayDefaults);
    extract_field_documentation(&defaults_schema, "defaults", &mut field_docs);

    let mut output = String::from(HEADER);
    output.push_str(&add_comments_to_yaml(&yaml_string, &field_docs));
    output.push('\n');

    let write_error = |source: io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, output).map_err(write_error)
}

fn extract_field_documentation(
    schema: &Schema,
    prefix: &str,
    field_docs: &mut HashMap<String, String>,
) {
    let Some(properties) = schema
        .as_object()
        .and_then(|schema_obj| schema_obj.get("properties"))
        .and_then(|properties| properties.as_object())
    else {
        return;
    };

    for (key, prop_value) in properties {
        let field_path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let Some(prop_obj) = prop_value.as_object() else {
            continue;
        };

        if let Some(desc_str) = prop_obj.get("description").and_then(|d| d.as_str()) {
            field_docs.insert(field_path.clone(), desc_str.to_string());
        }

        // Inline nested objects carry their own properties
        if prop_obj.contains_key("properties") {
            if let Ok(nested_schema) = Schema::try_from(prop_value.clone()) {
                extract_field_documentation(&nested_schema, &field_path, field_docs);
            }
        }
    }
}

fn add_comments_to_yaml(yaml: &str, field_docs: &HashMap<String, String>) -> String {
    let mut result = Vec::new();
    let mut field_path_stack = Vec::new();

    for line in yaml.lines() {
        if let Some(colon_pos) = line.find(':') {
            let before_colon = &line[..colon_pos];
            let field_name = before_colon.trim();

            let indent_level = (before_colon.len() - before_colon.trim_start().len()) / 2;
            let indent = "  ".repeat(indent_level);
            field_path_stack.truncate(indent_level);
            field_path_stack.push(field_name.to_string());
            let full_field_path = field_path_stack.join(".");

            if let Some(doc) = field_docs.get(&full_field_path) {
                if !result.is_empty() {
                    result.push(String::new());
                }
                result.push(format!("{}# {}", indent, doc));
            }
        }

        result.push(line.to_string());
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_follow_nesting() {
        let mut docs = HashMap::new();
        docs.insert("defaults".to_owned(), "Defaults".to_owned());
        docs.insert("defaults.fixed_header".to_owned(), "Header".to_owned());
        docs.insert("fixed_header".to_owned(), "Top level".to_owned());

        let yaml = "defaults:\n  fixed_header: false\nclose_fade_ms: 400";
        let commented = add_comments_to_yaml(yaml, &docs);

        assert_eq!(
            commented,
            "# Defaults\ndefaults:\n\n  # Header\n  fixed_header: false\nclose_fade_ms: 400"
        );
    }

    #[test]
    fn test_config_docs_extracted() {
        let mut docs = HashMap::new();
        extract_field_documentation(&schema_for!(Config), "", &mut docs);
        extract_field_documentation(&schema_for!(OverlayDefaults), "defaults", &mut docs);

        assert!(docs.contains_key("close_fade_ms"));
        assert!(docs.contains_key("defaults.open_trigger"));
        assert!(!docs.contains_key("config_path"));
    }

    #[test]
    fn test_serialized_file_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        serialize_config(&Config::default(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# FullScreenOverlay Configuration File"));
        assert!(contents.contains("# Duration of the fade"));
    }
}
