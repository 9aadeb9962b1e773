//! Wire-format types for provider datasets
//!
//! The provider serves a JSON array of region objects. Each node carries
//! localized name fields (`name_th`, `name_en`, ...); region nodes nest
//! sub-regions under `lv4`, sub-regions nest localities under `lv5`, and
//! leaf nodes carry `zip_code`. Field naming is the provider's contract;
//! unknown extra fields are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// A top-level region node as served by the dataset provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRegion {
    /// Child sub-region nodes.
    #[serde(default)]
    pub lv4: Vec<RawSubRegion>,
    /// Remaining fields, including the localized `name_<language>` entries.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// A mid-level sub-region node.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubRegion {
    /// Child locality nodes.
    #[serde(default)]
    pub lv5: Vec<RawLocality>,
    /// Remaining fields, including the localized `name_<language>` entries.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// A leaf locality node.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocality {
    /// Postal code; providers serve this as either a string or a number.
    pub zip_code: Option<Value>,
    /// Remaining fields, including the localized `name_<language>` entries.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RawRegion {
    /// Returns the display name for the given language, if present.
    pub fn display_name(&self, language: &str) -> Option<&str> {
        localized_name(&self.fields, language)
    }
}

impl RawSubRegion {
    /// Returns the display name for the given language, if present.
    pub fn display_name(&self, language: &str) -> Option<&str> {
        localized_name(&self.fields, language)
    }
}

impl RawLocality {
    /// Returns the display name for the given language, if present.
    pub fn display_name(&self, language: &str) -> Option<&str> {
        localized_name(&self.fields, language)
    }

    /// Returns the postal code normalized to a string.
    pub fn postal_code(&self) -> Option<String> {
        match self.zip_code.as_ref()? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }
}

fn localized_name<'a>(fields: &'a BTreeMap<String, Value>, language: &str) -> Option<&'a str> {
    fields.get(&format!("name_{language}")).and_then(Value::as_str)
}
