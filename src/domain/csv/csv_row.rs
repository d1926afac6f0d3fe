// ============================================================
// CSV ROW TYPES
// ============================================================
// Data structures representing parsed CSV content

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field in a CSV row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvField {
    /// Original field name (header)
    pub name: String,

    /// Cleaned field name, for header-insensitive lookups
    pub clean_name: String,

    /// Field value
    pub value: String,

    /// Whether the value is empty
    pub is_empty: bool,
}

impl CsvField {
    pub fn new(name: String, value: String) -> Self {
        let is_empty = value.trim().is_empty();
        let clean_name = clean_field_name(&name);

        Self {
            name,
            clean_name,
            value,
            is_empty,
        }
    }
}

/// Normalize a header name: lowercase, special characters and whitespace
/// collapsed to underscores, so that e.g. "Featured Image" and "featuredImage"
/// both resolve against "featuredimage"-style lookups.
fn clean_field_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// A single row in a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based)
    pub index: usize,

    /// All fields in this row
    pub fields: Vec<CsvField>,

    /// Non-empty values keyed by cleaned field name
    pub field_map: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        let field_map = fields
            .iter()
            .filter(|f| !f.is_empty)
            .map(|f| (f.clean_name.clone(), f.value.clone()))
            .collect();

        Self {
            index,
            fields,
            field_map,
        }
    }

    /// Look up a value by its exact header name, falling back to the cleaned
    /// form of the requested name.
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(field) = self.fields.iter().find(|f| f.name == name) {
            return Some(field.value.as_str());
        }
        self.field_map
            .get(&clean_field_name(name))
            .map(|v| v.as_str())
    }

    /// Like `get`, but treats blank values as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
