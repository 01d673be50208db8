use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "multiple-choice" => Some(QuestionType::MultipleChoice),
            "true-false" => Some(QuestionType::TrueFalse),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Guidance handed to the model for this difficulty level.
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Focus on basic concepts and direct information from the text",
            Difficulty::Medium => "Require some analysis and connection of concepts",
            Difficulty::Hard => "Demand critical thinking, synthesis, and deeper understanding",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option index for multiple-choice, "True"/"False" for true-false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: CorrectAnswer,
    pub explanation: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub source_file: String,
}

impl Question {
    /// Checks the type/answer pairing every emitted question must satisfy.
    pub fn is_well_formed(&self) -> bool {
        match (self.question_type, &self.correct_answer) {
            (QuestionType::MultipleChoice, CorrectAnswer::Index(idx)) => self
                .options
                .as_ref()
                .map(|opts| !opts.is_empty() && *idx < opts.len())
                .unwrap_or(false),
            (QuestionType::TrueFalse, CorrectAnswer::Text(answer)) => {
                self.options.is_none() && (answer == "True" || answer == "False")
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypes {
    #[serde(default)]
    pub multiple_choice: bool,
    #[serde(default)]
    pub true_false: bool,
}

impl QuestionTypes {
    /// Requested types, multiple-choice first.
    pub fn selected(&self) -> Vec<QuestionType> {
        let mut types = Vec::new();
        if self.multiple_choice {
            types.push(QuestionType::MultipleChoice);
        }
        if self.true_false {
            types.push(QuestionType::TrueFalse);
        }
        types
    }

    pub fn is_empty(&self) -> bool {
        !self.multiple_choice && !self.true_false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default)]
    pub question_count: i64,
    #[serde(default)]
    pub question_types: QuestionTypes,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl GenerationRequest {
    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u128,
    pub message: String,
}

impl GenerationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            questions: Vec::new(),
            processing_time_ms: 0,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub file_name: String,
    pub extracted_text: String,
    pub page_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}
