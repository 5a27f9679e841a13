use super::types::{Field, FieldEntry};
use crate::error::{io_with_path, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads `fields.yml` and returns its fields flattened in declaration order.
pub fn load_fields(path: &Path) -> Result<Vec<Field>> {
    let yaml_string =
        fs::read_to_string(path).map_err(|e| io_with_path(e, "read fields file", path))?;
    let fields = parse_fields(&yaml_string)?;

    debug!(path = %path.display(), count = fields.len(), "Loaded fields");
    Ok(fields)
}

pub fn parse_fields(yaml: &str) -> Result<Vec<Field>> {
    // An empty document is a valid, empty field set
    let entries: Option<Vec<FieldEntry>> = serde_yaml::from_str(yaml)?;

    let mut flattened = Vec::new();
    for entry in entries.unwrap_or_default() {
        match entry {
            FieldEntry::Key(key) => flatten(key.fields, "", &mut flattened),
            FieldEntry::Field(field) => flatten(vec![field], "", &mut flattened),
        }
    }
    Ok(flattened)
}

fn flatten(fields: Vec<Field>, prefix: &str, out: &mut Vec<Field>) {
    for mut field in fields {
        // A nameless group contributes its children but no path segment
        if field.name.is_empty() {
            if field.is_group() {
                flatten(std::mem::take(&mut field.fields), prefix, out);
            }
            continue;
        }

        field.path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        if field.is_group() {
            let children = std::mem::take(&mut field.fields);
            flatten(children, &field.path, out);
        } else {
            out.push(field);
        }
    }
}
