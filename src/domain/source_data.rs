use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WEBSITE: &str = "website";
pub const URL: &str = "url";
pub const USER_AGENT: &str = "userAgent";
pub const IP_ADDRESS: &str = "ipAddress";
pub const TIMESTAMP: &str = "timestamp";
pub const EMBED_TYPE: &str = "embed_type";

/// Where a subscription came from, stored as a flat JSON object of strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SourceData(BTreeMap<String, String>);

impl SourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries of `other` win over existing entries with the same key.
    pub fn merge(mut self, other: SourceData) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Accepts `null` or a JSON object whose values are all strings.
    pub fn parse(value: serde_json::Value) -> Result<Option<SourceData>, String> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) => {
                let mut source_data = SourceData::new();
                for (key, value) in map {
                    match value {
                        serde_json::Value::String(value) => source_data.insert(key, value),
                        _ => return Err("The source data values must be strings.".to_string()),
                    }
                }
                Ok(Some(source_data))
            }
            _ => Err("The source data field must be an object.".to_string()),
        }
    }
}

impl FromIterator<(String, String)> for SourceData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
