use serde::{Deserialize, Serialize};

/// A top-level entry of `fields.yml`. Keys only group fields for documentation
/// and do not contribute to field paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldKey {
    pub key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A top-level entry is either a documentation key or a bare field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Key(FieldKey),
    Field(Field),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub description: Option<String>,

    // Kibana format hints
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub output_precision: Option<u32>,
    pub label_template: Option<String>,
    pub url_template: Option<String>,
    pub open_link_in_current_tab: Option<bool>,

    // Index flags
    pub index: Option<bool>,
    pub analyzed: Option<bool>,
    pub doc_values: Option<bool>,
    pub searchable: Option<bool>,
    pub aggregatable: Option<bool>,
    pub count: Option<u64>,

    #[serde(default)]
    pub fields: Vec<Field>,

    /// Dotted path, filled in when groups are flattened.
    #[serde(skip)]
    pub path: String,
}

impl Field {
    pub fn is_group(&self) -> bool {
        self.field_type.as_deref() == Some("group")
    }

    pub fn type_name(&self) -> Option<&str> {
        self.field_type.as_deref()
    }
}
