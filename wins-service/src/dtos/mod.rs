//! Request and response bodies for the `/api` endpoints.
//!
//! Caller fields are kept as raw JSON values: the check-in is echoed into
//! the prompt as sent, and draft fields are rendered as text.

pub mod values;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use validator::{Validate, ValidationError, ValidationErrors};

use values::{deserialize_present, is_truthy};

/// Weekly check-in. Every field is optional; absent fields are left out of
/// the prompt entirely, while an explicit `null` is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInInput {
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub went_well: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub was_hard: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub visible_win: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub recognize_who: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Value>,
}

/// One evidence-backed accomplishment, in the shape the model is asked for.
///
/// The analyze endpoint passes model output through untyped; this type is
/// for consumers that want to read it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Win {
    pub id: String,
    pub title: String,
    pub story: String,
    pub evidence: String,
    #[serde(default)]
    pub celebration_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResult {
    pub summary: String,
    /// Whatever the model produced under `wins`, or `[]`.
    pub wins: Value,
}

/// The part of a [`Win`] needed to write a draft.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DraftWin {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub story: Option<Value>,
    #[serde(default)]
    pub evidence: Option<Value>,
}

impl Validate for DraftWin {
    /// Title and story must both be present and truthy.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [("title", &self.title), ("story", &self.story)] {
            if !value.as_ref().is_some_and(is_truthy) {
                errors.add(field, ValidationError::new("required"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default, deserialize_with = "deserialize_win")]
    pub win: Option<DraftWin>,
    #[serde(default)]
    pub channel: Option<Value>,
    #[serde(default)]
    pub tone: Option<Value>,
    #[serde(default)]
    pub outcome: Option<Value>,
    #[serde(default)]
    pub recognize_who: Option<Value>,
}

/// Anything other than a JSON object reads as no win at all.
fn deserialize_win<'de, D>(deserializer: D) -> Result<Option<DraftWin>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        object @ Value::Object(_) => serde_json::from_value(object)
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl DraftRequest {
    /// The win, provided it carries a truthy title and story.
    pub fn validated_win(&self) -> Result<&DraftWin, AppError> {
        let missing = || AppError::BadRequest("Missing win.title or win.story".to_string());

        let win = self.win.as_ref().ok_or_else(missing)?;
        win.validate().map_err(|_| missing())?;
        Ok(win)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    pub draft: String,
}
