use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the Gemini client and the generation pipeline.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Missing key is not fatal at start-up; requests fail validation instead.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Largest number of questions asked of the model in a single call.
    pub max_questions_per_request: usize,
    /// Upper bound on `questionCount` for a single request.
    pub max_question_count: usize,
    /// Source text beyond this many characters is cut before prompting.
    pub max_source_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model_name: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 8192,
            max_questions_per_request: 25,
            max_question_count: 200,
            max_source_chars: 12_000,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            api_base_url: env::var("GEMINI_API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: env::var("GEMINI_MODEL").unwrap_or(default.model_name),
            temperature: parse_env("GEMINI_TEMPERATURE").unwrap_or(default.temperature),
            max_output_tokens: parse_env("GEMINI_MAX_OUTPUT_TOKENS")
                .unwrap_or(default.max_output_tokens),
            max_questions_per_request: parse_env("MAX_QUESTIONS_PER_REQUEST")
                .filter(|cap: &usize| *cap > 0)
                .unwrap_or(default.max_questions_per_request),
            max_question_count: parse_env("MAX_QUESTION_COUNT")
                .filter(|max: &usize| *max > 0)
                .unwrap_or(default.max_question_count),
            max_source_chars: parse_env("MAX_SOURCE_CHARS").unwrap_or(default.max_source_chars),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
