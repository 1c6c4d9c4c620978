use serde::Deserialize;

/// A single submission of the search form.
///
/// The topic is stored trimmed; an all-whitespace input never becomes a
/// `SearchQuery` that reaches the network (see
/// [`StudyWorkflow::submit`](crate::services::workflow::StudyWorkflow::submit)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub topic: String,
    pub math_mode: bool,
}

impl SearchQuery {
    /// Build a query from raw form input, trimming the topic.
    pub fn new(topic: &str, math_mode: bool) -> Self {
        Self {
            topic: topic.trim().to_string(),
            math_mode,
        }
    }

    /// True when the trimmed topic is empty and submission must be rejected.
    pub fn is_empty(&self) -> bool {
        self.topic.is_empty()
    }
}

/// A multiple-choice quiz question.
///
/// Options are labelled by position (`'A' + index`); `correct` holds the
/// letter of the right option as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl QuizItem {
    /// Letter label for an option index: 0 → 'A', 1 → 'B', ...
    ///
    /// Indices beyond 'Z' have no label; the API returns at most four options.
    pub fn option_letter(index: usize) -> Option<char> {
        if index < 26 {
            Some((b'A' + index as u8) as char)
        } else {
            None
        }
    }

    /// Index of the option whose derived letter matches `correct` exactly.
    ///
    /// Returns `None` when `correct` is not a single letter matching any
    /// option position, in which case no option is marked.
    pub fn correct_index(&self) -> Option<usize> {
        let mut chars = self.correct.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        (0..self.options.len()).find(|&i| Self::option_letter(i) == Some(letter))
    }
}

/// The quantitative question returned in math mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MathQuestion {
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

/// Study materials for the normal display variant. All fields are required
/// by the upstream contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyMaterials {
    pub summary: Vec<String>,
    pub quiz: Vec<QuizItem>,
    pub study_tip: String,
    pub source: Option<String>,
}

/// Study materials for the math display variant. The textual materials may
/// be absent and render as empty; the math question itself is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathMaterials {
    pub summary: Vec<String>,
    pub quiz: Vec<QuizItem>,
    pub study_tip: Option<String>,
    pub math_question: MathQuestion,
    pub source: Option<String>,
}

/// A successful study response, discriminated by the wire-level `mode` field.
///
/// `"math"` selects [`StudyResult::Math`]; any other value (including a
/// missing `mode`) selects [`StudyResult::Normal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyResult {
    Normal(StudyMaterials),
    Math(MathMaterials),
}

/// Which display template a result selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Normal,
    Math,
}

impl StudyResult {
    /// Pure display selection: a function of the discriminant only.
    pub fn display_mode(&self) -> DisplayMode {
        match self {
            StudyResult::Normal(_) => DisplayMode::Normal,
            StudyResult::Math(_) => DisplayMode::Math,
        }
    }
}

/// Raw success body as it appears on the wire, before the discriminant and
/// the per-variant field requirements are validated.
///
/// Validation lives in
/// [`parse_study_response`](crate::services::study_api::parse_study_response).
#[derive(Debug, Clone, Deserialize)]
pub struct RawStudyResponse {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub summary: Option<Vec<String>>,
    #[serde(default)]
    pub quiz: Option<Vec<QuizItem>>,
    #[serde(default)]
    pub study_tip: Option<String>,
    #[serde(default)]
    pub math_question: Option<MathQuestion>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Structured error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
