//! Wire types of the ChatAI service.

use serde::{Deserialize, Serialize};

/// The answer returned by the ChatAI service.
///
/// Missing fields decode to their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnswer {
    /// The answer text.
    #[serde(default)]
    pub answer: String,
    /// How confident the service is in the answer.
    #[serde(default)]
    pub confidence_score: f32,
}

/// The request body sent to the ChatAI service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Question<'a> {
    pub(crate) query: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_uses_camel_case_fields() {
        let answer: AiAnswer =
            serde_json::from_str(r#"{"answer":"reduce heap allocations","confidenceScore":95}"#)
                .unwrap();
        assert_eq!(answer.answer, "reduce heap allocations");
        assert!((answer.confidence_score - 95.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_answer_tolerates_missing_fields() {
        let answer: AiAnswer = serde_json::from_str(r#"{"error":"bad input"}"#).unwrap();
        assert_eq!(answer, AiAnswer::default());
    }

    #[test]
    fn test_question_serializes_query_field() {
        let body = serde_json::to_string(&Question { query: "x" }).unwrap();
        assert_eq!(body, r#"{"query":"x"}"#);
    }
}
