use crate::config::GeneratorConfig;
use crate::document_processor::DocumentProcessor;
use crate::error::{GenerationError, GenerationOutcome};
use crate::gemini_service::TextGenerator;
use crate::models::*;
use crate::prompt_builder::PromptBuilder;
use crate::question_bank::QuestionBank;
use crate::response_parser::ResponseParser;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Runs one generation request end to end: prompt, model call(s), parse,
/// top up from the question bank. Holds no per-request state.
pub struct QuestionService {
    generator: Arc<dyn TextGenerator>,
    document_processor: DocumentProcessor,
    prompt_builder: PromptBuilder,
    question_bank: QuestionBank,
    max_questions_per_request: usize,
    max_question_count: usize,
}

struct Plan<'a> {
    request_id: Uuid,
    corpus: String,
    question_count: usize,
    question_types: Vec<QuestionType>,
    difficulty: Difficulty,
    file_names: &'a [String],
}

impl QuestionService {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &GeneratorConfig) -> Self {
        Self {
            generator,
            document_processor: DocumentProcessor::new(),
            prompt_builder: PromptBuilder::new(config.max_source_chars),
            question_bank: QuestionBank::new(),
            max_questions_per_request: config.max_questions_per_request.max(1),
            max_question_count: config.max_question_count,
        }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> GenerationOutcome<GenerationResult> {
        let question_count = self.validate(request)?;
        let start_time = Instant::now();
        let file_names = request.file_names();

        let plan = Plan {
            request_id: Uuid::new_v4(),
            corpus: self.document_processor.combined_text(&request.files),
            question_count,
            question_types: request.question_types.selected(),
            difficulty: request.difficulty,
            file_names: &file_names,
        };

        log::info!(
            "[{}] Generating {} questions of types: {} at {} difficulty",
            plan.request_id,
            question_count,
            plan.question_types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            plan.difficulty
        );

        let mut ai_questions = match self.generate_from_model(&plan).await {
            Ok(questions) => questions,
            Err(e) => {
                log::error!("[{}] Error generating questions: {}", plan.request_id, e);
                log::info!("[{}] Falling back to question bank", plan.request_id);
                let questions = self.question_bank.generate(
                    question_count,
                    request.question_types,
                    request.difficulty,
                    &file_names,
                );
                let questions = assign_ids(Vec::new(), questions);
                return Ok(GenerationResult {
                    success: true,
                    message: format!(
                        "Generated {} questions using fallback method (AI temporarily unavailable)",
                        questions.len()
                    ),
                    questions,
                    processing_time_ms: start_time.elapsed().as_millis(),
                });
            }
        };

        log::info!(
            "[{}] Model produced {} questions (requested: {})",
            plan.request_id,
            ai_questions.len(),
            question_count
        );
        ai_questions.truncate(question_count);

        let missing = question_count - ai_questions.len();
        let fallback = if missing > 0 {
            log::info!(
                "[{}] Insufficient questions generated ({}/{}). Adding fallback questions...",
                plan.request_id,
                ai_questions.len(),
                question_count
            );
            self.question_bank
                .generate(missing, request.question_types, request.difficulty, &file_names)
        } else {
            Vec::new()
        };

        let ai_count = ai_questions.len();
        let fallback_count = fallback.len();
        let questions = assign_ids(ai_questions, fallback);

        let message = if fallback_count == 0 {
            format!(
                "Successfully generated {} questions from {} file(s) using Gemini AI",
                questions.len(),
                request.files.len()
            )
        } else {
            format!(
                "Generated {} questions from {} file(s): \
                 {} from Gemini AI, {} from fallback question bank",
                questions.len(),
                request.files.len(),
                ai_count,
                fallback_count
            )
        };

        Ok(GenerationResult {
            success: true,
            questions,
            processing_time_ms: start_time.elapsed().as_millis(),
            message,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> GenerationOutcome<usize> {
        if request.files.is_empty() {
            return Err(GenerationError::validation("At least one file is required"));
        }
        if request.question_count <= 0 {
            return Err(GenerationError::validation(
                "Question count must be greater than 0",
            ));
        }
        let question_count = usize::try_from(request.question_count)
            .ok()
            .filter(|count| *count <= self.max_question_count)
            .ok_or_else(|| {
                GenerationError::validation(format!(
                    "Question count must not exceed {}",
                    self.max_question_count
                ))
            })?;
        if request.question_types.is_empty() {
            return Err(GenerationError::validation(
                "At least one question type must be selected",
            ));
        }
        if !self.generator.is_configured() {
            log::error!("Gemini API key not configured");
            return Err(GenerationError::MissingCredentials);
        }
        Ok(question_count)
    }

    async fn generate_from_model(&self, plan: &Plan<'_>) -> Result<Vec<Question>> {
        let parser = ResponseParser::new(plan.difficulty);
        let cap = self.max_questions_per_request;

        if plan.question_count <= cap {
            let prompt = self.prompt_builder.build(
                &plan.corpus,
                plan.question_count,
                &plan.question_types,
                plan.difficulty,
                None,
            );
            let generated_text = self.generator.generate(&prompt).await?;
            return Ok(parser.parse(&generated_text, plan.file_names, 0));
        }

        let sizes = chunk_sizes(plan.question_count, cap);
        log::info!(
            "[{}] Breaking {} questions into {} chunks of up to {} each",
            plan.request_id,
            plan.question_count,
            sizes.len(),
            cap
        );

        let mut all_questions = Vec::new();
        let mut last_error = None;
        let mut completed = 0;

        // One chunk in flight at a time.
        for (i, chunk_size) in sizes.iter().copied().enumerate() {
            log::info!(
                "[{}] Generating chunk {}/{} with {} questions...",
                plan.request_id,
                i + 1,
                sizes.len(),
                chunk_size
            );

            let prompt = self.prompt_builder.build(
                &plan.corpus,
                chunk_size,
                &plan.question_types,
                plan.difficulty,
                Some(i + 1),
            );

            match self.generator.generate(&prompt).await {
                Ok(generated_text) => {
                    let questions = parser.parse(&generated_text, plan.file_names, i * cap);
                    log::info!(
                        "[{}] Chunk {} generated {} questions",
                        plan.request_id,
                        i + 1,
                        questions.len()
                    );
                    all_questions.extend(questions);
                    completed += 1;
                }
                Err(e) => {
                    log::warn!("[{}] Error in chunk {}: {}", plan.request_id, i + 1, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if completed == 0 => Err(e),
            _ => Ok(all_questions),
        }
    }
}

/// Splits `total` into chunks of at most `cap`; the last chunk takes the rest.
pub fn chunk_sizes(total: usize, cap: usize) -> Vec<usize> {
    let cap = cap.max(1);
    let mut sizes = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        let size = remaining.min(cap);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}

/// Numbers every question from a single counter so model and fallback ids
/// can never collide.
fn assign_ids(ai_questions: Vec<Question>, fallback: Vec<Question>) -> Vec<Question> {
    let ai = ai_questions.into_iter().map(|q| ("q", q));
    let bank = fallback.into_iter().map(|q| ("fallback", q));

    ai.chain(bank)
        .enumerate()
        .map(|(n, (prefix, mut question))| {
            question.id = format!("{}-{}", prefix, n);
            question
        })
        .collect()
}
