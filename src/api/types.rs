//! Wire types for the recommendation service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
    pub session_id: String,
}

/// Response of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Assistant reply text.
    pub response: String,
}

/// Response of `POST /recommend`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Missing key means no eligible cards.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Card perks: the service sends either free text or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Perks {
    List(Vec<String>),
    Text(String),
}

impl Default for Perks {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<Value> for Perks {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.into_iter().map(display_text).collect()),
            other => Self::Text(display_text(other)),
        }
    }
}

impl std::fmt::Display for Perks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(items) => write!(f, "{}", items.join(", ")),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// A credit-card offer returned by the service.
///
/// Pass-through data: nothing here is validated or derived locally. Scalars
/// of any JSON type are kept as their display text and `null` reads as empty,
/// so one oddly typed field never rejects the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub issuer: String,
    #[serde(deserialize_with = "text")]
    pub rewards: String,
    #[serde(deserialize_with = "perks")]
    pub perks: Perks,
    #[serde(deserialize_with = "text")]
    pub estimated_benefit: String,
    #[serde(deserialize_with = "text_list")]
    pub key_reasons: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub apply_link: String,
    #[serde(
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

/// Strings as-is, `null` as empty, anything else as its JSON text.
fn display_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(display_text)
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(display_text(other)),
    })
}

fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(display_text).collect(),
        other => vec![display_text(other)],
    })
}

fn perks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Perks, D::Error> {
    Value::deserialize(deserializer).map(Perks::from)
}
