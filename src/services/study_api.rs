use crate::models::{
    ApiErrorBody, GENERIC_FETCH_ERROR, MathMaterials, RawStudyResponse, StudyMaterials,
    StudyResult,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching study materials.
///
/// All of these are caught at the workflow boundary and converted into the
/// `Error(message)` request state; none is fatal to the running UI.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response; the message is built from the structured error body
    #[error("{0}")]
    Request(String),

    /// Network failure or malformed response body
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Success response violating the study contract
    #[error("{0}")]
    Contract(String),
}

/// Seam for the external study API.
///
/// The workflow depends on this trait rather than on the HTTP client
/// directly, so submission logic is testable without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudyApi: Send + Sync {
    /// Fetch study materials for a topic.
    ///
    /// `math_mode` selects the `mode=math` request parameter; otherwise the
    /// mode parameter is sent as the empty string.
    async fn fetch_study(&self, topic: &str, math_mode: bool) -> Result<StudyResult, ApiError>;
}

/// HTTP client for the study API.
///
/// Issues a single GET to `{base}/study?topic=<urlencoded>&mode=<"math"|"">`
/// per call. No retry; no timeout beyond what the transport layer provides.
pub struct HttpStudyApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudyApi {
    /// Create a client for the given base URL (no trailing slash expected).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StudyApi for HttpStudyApi {
    async fn fetch_study(&self, topic: &str, math_mode: bool) -> Result<StudyResult, ApiError> {
        let url = format!("{}/study", self.base_url);
        let mode = if math_mode { "math" } else { "" };

        tracing::debug!(%url, topic, mode, "Requesting study materials");

        let response = self
            .client
            .get(&url)
            .query(&[("topic", topic), ("mode", mode)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await?;
            let message = request_error_message(&body);
            tracing::warn!(%status, "Study request failed: {}", message);
            return Err(ApiError::Request(message));
        }

        let raw: RawStudyResponse = response.json().await?;
        parse_study_response(raw)
    }
}

/// Build the user-facing message for a non-2xx response.
///
/// The `error` field (or the fixed fallback when absent or empty) comes
/// first; `details`, when present, is appended after a blank line. Embedded
/// line breaks are preserved all the way to the renderer.
pub fn request_error_message(body: &ApiErrorBody) -> String {
    let error = body
        .error
        .as_deref()
        .filter(|e| !e.is_empty())
        .unwrap_or(GENERIC_FETCH_ERROR);

    match body.details.as_deref().filter(|d| !d.is_empty()) {
        Some(details) => format!("{}\n\n{}", error, details),
        None => error.to_string(),
    }
}

/// Validate the wire discriminant and per-variant field requirements.
///
/// `mode: "math"` selects the math variant, where the textual materials are
/// optional but the math question is mandatory. Any other mode (or none)
/// selects the normal variant, where summary, quiz, and study tip are all
/// required.
pub fn parse_study_response(raw: RawStudyResponse) -> Result<StudyResult, ApiError> {
    if raw.mode.as_deref() == Some("math") {
        let math_question = raw.math_question.ok_or_else(|| {
            ApiError::Contract("Math mode response is missing its math question".to_string())
        })?;

        return Ok(StudyResult::Math(MathMaterials {
            summary: raw.summary.unwrap_or_default(),
            quiz: raw.quiz.unwrap_or_default(),
            study_tip: raw.study_tip.filter(|t| !t.is_empty()),
            math_question,
            source: raw.source,
        }));
    }

    let summary = raw
        .summary
        .ok_or_else(|| ApiError::Contract("Response is missing the summary".to_string()))?;
    let quiz = raw
        .quiz
        .ok_or_else(|| ApiError::Contract("Response is missing the quiz".to_string()))?;
    let study_tip = raw
        .study_tip
        .ok_or_else(|| ApiError::Contract("Response is missing the study tip".to_string()))?;

    Ok(StudyResult::Normal(StudyMaterials {
        summary,
        quiz,
        study_tip,
        source: raw.source,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayMode;

    fn raw(json: &str) -> RawStudyResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_error_message_with_details() {
        let body = ApiErrorBody {
            error: Some("Wikipedia page not found".to_string()),
            details: Some("Try a more general topic".to_string()),
        };

        assert_eq!(
            request_error_message(&body),
            "Wikipedia page not found\n\nTry a more general topic"
        );
    }

    #[test]
    fn test_request_error_message_without_details() {
        let body = ApiErrorBody {
            error: Some("Topic parameter is required".to_string()),
            details: None,
        };
        assert_eq!(request_error_message(&body), "Topic parameter is required");
    }

    #[test]
    fn test_request_error_message_fallback() {
        assert_eq!(
            request_error_message(&ApiErrorBody::default()),
            "Failed to fetch study materials"
        );

        // Empty strings behave like absent fields
        let body = ApiErrorBody {
            error: Some(String::new()),
            details: Some(String::new()),
        };
        assert_eq!(request_error_message(&body), "Failed to fetch study materials");
    }

    #[test]
    fn test_parse_normal_response() {
        let result = parse_study_response(raw(
            r#"{
                "mode": "normal",
                "summary": ["a", "b", "c"],
                "quiz": [{"question": "Q?", "options": ["1", "2"], "correct": "A"}],
                "study_tip": "practice",
                "source": "Wikipedia + Gemini AI"
            }"#,
        ))
        .unwrap();

        assert_eq!(result.display_mode(), DisplayMode::Normal);
        let StudyResult::Normal(materials) = result else {
            panic!("expected normal variant");
        };
        assert_eq!(materials.summary.len(), 3);
        assert_eq!(materials.quiz.len(), 1);
        assert_eq!(materials.study_tip, "practice");
        assert_eq!(materials.source.as_deref(), Some("Wikipedia + Gemini AI"));
    }

    #[test]
    fn test_unknown_mode_selects_normal_variant() {
        let result = parse_study_response(raw(
            r#"{"mode": "anything", "summary": [], "quiz": [], "study_tip": "t"}"#,
        ))
        .unwrap();
        assert_eq!(result.display_mode(), DisplayMode::Normal);

        let result = parse_study_response(raw(
            r#"{"summary": [], "quiz": [], "study_tip": "t"}"#,
        ))
        .unwrap();
        assert_eq!(result.display_mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_normal_response_missing_fields_is_a_contract_error() {
        let err = parse_study_response(raw(r#"{"quiz": [], "study_tip": "t"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Contract(_)));

        let err = parse_study_response(raw(r#"{"summary": [], "study_tip": "t"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Contract(_)));

        let err = parse_study_response(raw(r#"{"summary": [], "quiz": []}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Contract(_)));
    }

    #[test]
    fn test_parse_math_response() {
        let result = parse_study_response(raw(
            r#"{
                "mode": "math",
                "summary": ["a"],
                "quiz": [],
                "study_tip": "t",
                "math_question": {
                    "question": "3-4-5 triangle hypotenuse?",
                    "answer": "5",
                    "explanation": "Pythagorean theorem"
                }
            }"#,
        ))
        .unwrap();

        assert_eq!(result.display_mode(), DisplayMode::Math);
        let StudyResult::Math(materials) = result else {
            panic!("expected math variant");
        };
        assert_eq!(materials.math_question.answer, "5");
        assert_eq!(materials.study_tip.as_deref(), Some("t"));
    }

    #[test]
    fn test_math_response_with_absent_materials() {
        let result = parse_study_response(raw(
            r#"{
                "mode": "math",
                "math_question": {"question": "q", "answer": "a", "explanation": "e"}
            }"#,
        ))
        .unwrap();

        let StudyResult::Math(materials) = result else {
            panic!("expected math variant");
        };
        assert!(materials.summary.is_empty());
        assert!(materials.quiz.is_empty());
        assert!(materials.study_tip.is_none());
    }

    #[test]
    fn test_math_response_without_question_is_rejected() {
        let err =
            parse_study_response(raw(r#"{"mode": "math", "summary": ["a"]}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Contract(_)));
    }
}
