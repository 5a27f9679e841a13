use crate::error::{GeneratorError, Result};
use crate::fields::Field;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One entry of the index pattern's `fields` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KibanaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub count: u64,
    pub scripted: bool,
    pub indexed: bool,
    pub analyzed: bool,
    pub doc_values: bool,
    pub searchable: bool,
    pub aggregatable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFormat {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<FormatParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_link_in_current_tab: Option<bool>,
}

impl FormatParams {
    fn from_field(field: &Field) -> Option<Self> {
        let params = FormatParams {
            pattern: field.pattern.clone(),
            input_format: field.input_format.clone(),
            output_format: field.output_format.clone(),
            output_precision: field.output_precision,
            label_template: field.label_template.clone(),
            url_template: field.url_template.clone(),
            open_link_in_current_tab: field.open_link_in_current_tab,
        };
        if params == FormatParams::default() {
            None
        } else {
            Some(params)
        }
    }
}

pub type FieldFormatMap = BTreeMap<String, FieldFormat>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformedFields {
    pub fields: Vec<KibanaField>,
    pub field_format_map: FieldFormatMap,
}

/// Maps a declared `fields.yml` type onto the type Kibana displays.
pub fn kibana_type(declared: Option<&str>) -> &'static str {
    match declared {
        Some(
            "half_float" | "scaled_float" | "float" | "integer" | "long" | "short" | "byte"
            | "bytes" | "percent",
        ) => "number",
        Some("date") => "date",
        Some("geo_point") => "geo_point",
        Some("ip") => "ip",
        Some("boolean") => "boolean",
        _ => "string",
    }
}

/// Formatter implied by the declared type alone.
pub fn default_format(declared: Option<&str>) -> Option<&'static str> {
    match declared {
        Some("date") => Some("date"),
        Some("byte" | "bytes") => Some("bytes"),
        Some("percent") => Some("percent"),
        _ => None,
    }
}

/// Builds the Kibana field list and format map for already flattened fields.
pub fn transform_fields(fields: &[Field]) -> Result<TransformedFields> {
    let mut out = TransformedFields::default();
    let mut seen = HashSet::new();

    for field in fields {
        if !seen.insert(field.path.as_str()) {
            return Err(GeneratorError::DuplicateField {
                name: field.path.clone(),
            });
        }

        let (entry, format) = transform_field(field);
        if let Some(format) = format {
            out.field_format_map.insert(entry.name.clone(), format);
        }
        out.fields.push(entry);
    }

    Ok(out)
}

pub fn transform_field(field: &Field) -> (KibanaField, Option<FieldFormat>) {
    let declared = field.type_name();
    let indexed = field.index.unwrap_or(true);
    let is_text = declared == Some("text");

    let entry = KibanaField {
        name: field.path.clone(),
        field_type: kibana_type(declared).to_string(),
        count: field.count.unwrap_or(0),
        scripted: false,
        indexed,
        analyzed: field.analyzed.unwrap_or(is_text),
        doc_values: field.doc_values.unwrap_or(!is_text),
        searchable: indexed && field.searchable.unwrap_or(true),
        aggregatable: indexed && !is_text && field.aggregatable.unwrap_or(true),
    };

    let format_id = field
        .format
        .as_deref()
        .filter(|f| !f.is_empty())
        .or_else(|| default_format(declared));

    let format = format_id.map(|id| FieldFormat {
        id: id.to_string(),
        params: FormatParams::from_field(field),
    });

    (entry, format)
}
