use crate::domain::{FieldErrors, SourceData, SubscriberEmail, SubscriberName};
use serde::Deserialize;
use serde_json::Value;

/// Loosely typed submission body, checked field by field in `NewSubscriber::try_from`.
#[derive(Deserialize, Debug, Default)]
pub struct SubscriberParams {
    pub name: Option<Value>,
    pub email: Option<Value>,
    #[serde(alias = "sourceData")]
    pub source_data: Option<Value>,
}

impl SubscriberParams {
    /// Anything that is not a JSON object counts as an empty submission.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(object @ Value::Object(_)) => serde_json::from_value(object).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

#[derive(Debug)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub name: SubscriberName,
    pub source_data: Option<SourceData>,
}

impl TryFrom<SubscriberParams> for NewSubscriber {
    type Error = FieldErrors;

    fn try_from(params: SubscriberParams) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let name = required_string("name", params.name)
            .and_then(SubscriberName::parse)
            .map_err(|e| errors.add("name", e))
            .ok();
        let email = required_string("email", params.email)
            .and_then(SubscriberEmail::parse)
            .map_err(|e| errors.add("email", e))
            .ok();
        let source_data = SourceData::parse(params.source_data.unwrap_or(Value::Null))
            .map_err(|e| errors.add("source_data", e))
            .ok()
            .flatten();

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Self {
                email,
                name,
                source_data,
            }),
            _ => Err(errors),
        }
    }
}

fn required_string(field: &str, value: Option<Value>) -> Result<String, String> {
    match value {
        None | Some(Value::Null) => Err(format!("The {} field is required.", field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(format!("The {} field must be a string.", field)),
    }
}
