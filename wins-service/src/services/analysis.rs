//! Interpretation of the model's check-in analysis.

use crate::dtos::values::is_truthy;
use crate::dtos::AnalyzeResult;
use serde_json::Value;

pub const SUMMARY_PLACEHOLDER: &str = "Summary unavailable.";

/// Raw text reported when the reply carried no content at all.
pub const MISSING_CONTENT: &str = "undefined";

/// Outcome of reading the model's reply as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Parsed(AnalyzeResult),
    /// Not a JSON object; `raw` is the content exactly as received, or
    /// [`MISSING_CONTENT`].
    Malformed { raw: String },
}

/// Parse the first choice's content into an [`AnalyzeResult`].
///
/// Individual wins are not validated. A missing or empty `summary` becomes
/// [`SUMMARY_PLACEHOLDER`]; a missing, null, or otherwise empty `wins`
/// becomes `[]`.
pub fn parse_analysis(content: Option<&str>) -> AnalysisOutcome {
    let Some(raw) = content else {
        return AnalysisOutcome::Malformed {
            raw: MISSING_CONTENT.to_string(),
        };
    };

    let mut object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => object,
        _ => {
            return AnalysisOutcome::Malformed {
                raw: raw.to_string(),
            }
        }
    };

    let summary = match object.remove("summary") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => SUMMARY_PLACEHOLDER.to_string(),
    };

    let wins = match object.remove("wins") {
        Some(wins) if is_truthy(&wins) => wins,
        _ => Value::Array(Vec::new()),
    };

    AnalysisOutcome::Parsed(AnalyzeResult { summary, wins })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(content: &str) -> AnalyzeResult {
        match parse_analysis(Some(content)) {
            AnalysisOutcome::Parsed(result) => result,
            other => panic!("expected parsed analysis, got {:?}", other),
        }
    }

    #[test]
    fn passes_wins_through_untouched() {
        let result = parsed(
            r#"{
                "summary": "A strong week for onboarding.",
                "wins": [{ "id": "w1", "title": "Pilot done", "extra": 42 }]
            }"#,
        );

        assert_eq!(result.summary, "A strong week for onboarding.");
        assert_eq!(
            result.wins,
            json!([{ "id": "w1", "title": "Pilot done", "extra": 42 }])
        );
    }

    #[test]
    fn missing_fields_get_defaults() {
        let result = parsed("{}");
        assert_eq!(result.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(result.wins, json!([]));
    }

    #[test]
    fn null_or_empty_values_get_defaults() {
        let result = parsed(r#"{ "summary": "", "wins": null }"#);
        assert_eq!(result.summary, "Summary unavailable.");
        assert_eq!(result.wins, json!([]));
    }

    #[test]
    fn non_json_content_is_malformed_with_raw_text() {
        let raw = "Sure! Here are your wins:\n- shipped it";
        assert_eq!(
            parse_analysis(Some(raw)),
            AnalysisOutcome::Malformed {
                raw: raw.to_string()
            }
        );
    }

    #[test]
    fn json_that_is_not_an_object_is_malformed() {
        assert!(matches!(
            parse_analysis(Some("[1, 2]")),
            AnalysisOutcome::Malformed { .. }
        ));
        assert!(matches!(
            parse_analysis(Some("null")),
            AnalysisOutcome::Malformed { .. }
        ));
    }

    #[test]
    fn missing_content_is_malformed() {
        assert_eq!(
            parse_analysis(None),
            AnalysisOutcome::Malformed {
                raw: "undefined".to_string()
            }
        );
    }

    #[test]
    fn empty_content_is_malformed_and_kept_empty() {
        assert_eq!(
            parse_analysis(Some("")),
            AnalysisOutcome::Malformed { raw: String::new() }
        );
    }
}
