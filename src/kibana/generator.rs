use super::transform::{transform_fields, TransformedFields};
use crate::error::{io_with_path, GeneratorError, Result};
use crate::fields::load_fields;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FIELDS_FILE: &str = "fields.yml";
pub const INDEX_PATTERN_TYPE: &str = "index-pattern";
pub const TIME_FIELD_NAME: &str = "@timestamp";

/// Saved object schema version of the generated index pattern.
const OBJECT_VERSION: u64 = 1;

/// Attributes shared by both output variants. `fields` and `fieldFormatMap`
/// hold JSON encoded strings, which is how Kibana stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPatternAttributes {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
    pub fields: String,
    pub field_format_map: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub version: u64,
    pub attributes: IndexPatternAttributes,
}

/// Import file layout used by Kibana 6.x and later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedObjects {
    pub version: String,
    pub objects: Vec<SavedObject>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPattern {
    pub path: PathBuf,
    pub document: Value,
}

/// Produces the index pattern files of a single beat.
///
/// The target paths are plain fields and may be changed between construction
/// and [`Generator::generate`].
#[derive(Debug, Clone)]
pub struct Generator {
    pub index_name: String,
    pub version: String,
    pub fields_yaml: PathBuf,
    pub target_dir_default: PathBuf,
    pub target_dir_5x: PathBuf,
    pub target_filename: String,
}

impl Generator {
    /// Checks that `beat_dir` contains a `fields.yml` and creates both output
    /// directories below `beat_dir/_meta/kibana`.
    pub fn new(
        index_name: impl Into<String>,
        filename_prefix: &str,
        beat_dir: impl AsRef<Path>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let beat_dir = beat_dir.as_ref();
        let fields_yaml = beat_dir.join(FIELDS_FILE);

        match fs::metadata(&fields_yaml) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GeneratorError::NotFound { path: fields_yaml });
            }
            Err(e) => return Err(io_with_path(e, "inspect fields file", &fields_yaml)),
        }

        Ok(Generator {
            index_name: index_name.into(),
            version: version.into(),
            fields_yaml,
            target_dir_default: create_target_dir(beat_dir, "default")?,
            target_dir_5x: create_target_dir(beat_dir, "5.x")?,
            target_filename: format!("{}.json", clean_name(filename_prefix)),
        })
    }

    /// Writes the default and the 5.x index pattern, in that order, and
    /// returns both documents.
    pub fn generate(&self) -> Result<Vec<GeneratedPattern>> {
        let fields = load_fields(&self.fields_yaml)?;
        let transformed = transform_fields(&fields)?;
        let attributes = self.attributes(&transformed)?;

        let default_doc = serde_json::to_value(self.saved_objects(attributes.clone()))?;
        let legacy_doc = serde_json::to_value(&attributes)?;

        let default_path = self.target_dir_default.join(&self.target_filename);
        dump_to_file(&default_path, &default_doc)?;

        let legacy_path = self.target_dir_5x.join(&self.target_filename);
        dump_to_file(&legacy_path, &legacy_doc)?;

        Ok(vec![
            GeneratedPattern {
                path: default_path,
                document: default_doc,
            },
            GeneratedPattern {
                path: legacy_path,
                document: legacy_doc,
            },
        ])
    }

    fn attributes(&self, transformed: &TransformedFields) -> Result<IndexPatternAttributes> {
        Ok(IndexPatternAttributes {
            title: self.index_name.clone(),
            time_field_name: Some(TIME_FIELD_NAME.to_string()),
            fields: serde_json::to_string(&transformed.fields)?,
            field_format_map: serde_json::to_string(&transformed.field_format_map)?,
        })
    }

    fn saved_objects(&self, attributes: IndexPatternAttributes) -> SavedObjects {
        SavedObjects {
            version: self.version.clone(),
            objects: vec![SavedObject {
                id: self.index_name.clone(),
                object_type: INDEX_PATTERN_TYPE.to_string(),
                version: OBJECT_VERSION,
                attributes,
            }],
        }
    }
}

/// Removes every character that is not an ASCII letter or digit.
pub fn clean_name(name: &str) -> String {
    let re = Regex::new(r"[^A-Za-z0-9]+").unwrap();
    re.replace_all(name, "").to_string()
}

fn create_target_dir(beat_dir: &Path, variant: &str) -> Result<PathBuf> {
    let dir = beat_dir
        .join("_meta")
        .join("kibana")
        .join(variant)
        .join(INDEX_PATTERN_TYPE);

    fs::create_dir_all(&dir).map_err(|e| io_with_path(e, "create directory", &dir))?;
    debug!(dir = %dir.display(), "Target directory ready");
    Ok(dir)
}

fn dump_to_file(path: &Path, document: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).map_err(|e| io_with_path(e, "write index pattern", path))?;
    info!(path = %path.display(), "Index pattern written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIELDS: &str = r#"
- key: beat
  title: Beat
  fields:
    - name: "@timestamp"
      type: date
    - name: beat.hostname
      type: keyword
"#;

    fn beat_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FIELDS_FILE), FIELDS).unwrap();
        dir
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name(" beat index pattern"), "beatindexpattern");
        assert_eq!(clean_name("Beat@Index.!"), "BeatIndex");
        assert_eq!(clean_name("beatIndex"), "beatIndex");
        assert_eq!(clean_name("metric beat ?!"), "metricbeat");
        assert_eq!(clean_name("mybeat."), "mybeat");
    }

    #[test]
    fn test_clean_name_is_idempotent() {
        let once = clean_name("b eat ?!");
        assert_eq!(clean_name(&once), once);
    }

    #[test]
    fn test_new_sets_paths() {
        let dir = beat_dir();
        let generator = Generator::new("beat-index", "mybeat.", dir.path(), "7.0").unwrap();

        assert_eq!(generator.version, "7.0");
        assert_eq!(generator.index_name, "beat-index");
        assert_eq!(generator.fields_yaml, dir.path().join("fields.yml"));
        assert_eq!(generator.target_filename, "mybeat.json");
        assert_eq!(
            generator.target_dir_default,
            dir.path().join("_meta/kibana/default/index-pattern")
        );
        assert_eq!(
            generator.target_dir_5x,
            dir.path().join("_meta/kibana/5.x/index-pattern")
        );
        assert!(generator.target_dir_default.is_dir());
        assert!(generator.target_dir_5x.is_dir());
    }

    #[test]
    fn test_new_is_idempotent_on_existing_dirs() {
        let dir = beat_dir();
        Generator::new("beat-*", "beat", dir.path(), "7.0").unwrap();
        assert!(Generator::new("beat-*", "beat", dir.path(), "7.0").is_ok());
    }

    #[test]
    fn test_new_without_fields_file() {
        let dir = beat_dir();
        let result = Generator::new("beat-index", "mybeat.", dir.path().join("notexistent"), "7.0");
        assert!(matches!(result, Err(GeneratorError::NotFound { .. })));
    }

    #[test]
    fn test_default_document_envelope() {
        let dir = beat_dir();
        let generator = Generator::new("beat-*", "b eat ?!", dir.path(), "7.0.0-alpha1").unwrap();
        let patterns = generator.generate().unwrap();

        let doc = &patterns[0].document;
        assert_eq!(doc["version"], "7.0.0-alpha1");
        let object = &doc["objects"][0];
        assert_eq!(object["id"], "beat-*");
        assert_eq!(object["type"], "index-pattern");
        assert_eq!(object["version"], 1);
        assert_eq!(object["attributes"]["title"], "beat-*");
        assert_eq!(object["attributes"]["timeFieldName"], "@timestamp");
        assert!(object["attributes"]["fields"].is_string());
        assert!(object["attributes"]["fieldFormatMap"].is_string());
    }

    #[test]
    fn test_legacy_document_is_flat() {
        let dir = beat_dir();
        let generator = Generator::new("beat-*", "beat", dir.path(), "7.0.0").unwrap();
        let patterns = generator.generate().unwrap();

        let doc = &patterns[1].document;
        assert_eq!(doc["title"], "beat-*");
        assert!(doc.get("objects").is_none());
        assert_eq!(doc["fields"], patterns[0].document["objects"][0]["attributes"]["fields"]);
    }

    #[test]
    fn test_generate_after_fields_path_cleared() {
        let dir = beat_dir();
        let mut generator = Generator::new("beat-*", "beat", dir.path(), "7.0.0").unwrap();
        assert!(generator.generate().is_ok());

        generator.fields_yaml = PathBuf::new();
        assert!(generator.generate().is_err());
    }

    #[test]
    fn test_generate_with_malformed_fields() {
        let dir = beat_dir();
        let generator = Generator::new("beat-*", "beat", dir.path(), "7.0.0").unwrap();
        fs::write(&generator.fields_yaml, "- key: [broken").unwrap();

        assert!(matches!(generator.generate(), Err(GeneratorError::Parse(_))));
    }
}
