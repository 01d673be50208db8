use crate::models::*;
use unicode_segmentation::UnicodeSegmentation;

pub const QUESTION_START: &str = "QUESTION_START";
pub const QUESTION_END: &str = "QUESTION_END";

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub struct PromptBuilder {
    max_source_chars: usize,
}

impl PromptBuilder {
    pub fn new(max_source_chars: usize) -> Self {
        Self { max_source_chars }
    }

    /// Builds the generation prompt. `chunk` is the 1-based set number when a
    /// large request is split across several model calls.
    pub fn build(
        &self,
        text: &str,
        question_count: usize,
        question_types: &[QuestionType],
        difficulty: Difficulty,
        chunk: Option<usize>,
    ) -> String {
        let content = self.truncate_source(text);
        let type_names = question_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let distribution = distribution_line(question_count, question_types);
        let chunk_text = chunk.map(|n| format!(" (Set {})", n)).unwrap_or_default();
        let variety = if chunk.is_some() {
            "\n- Focus on different aspects of the content than previous sets"
        } else {
            ""
        };
        let options_format = if question_types.contains(&QuestionType::MultipleChoice) {
            "Options: [For multiple-choice only]\nA) Option 1\nB) Option 2\nC) Option 3\nD) Option 4\n"
        } else {
            ""
        };
        let difficulty_description = difficulty.description();

        format!(
            r#"You are an expert educational content creator. Generate EXACTLY {question_count} high-quality quiz questions{chunk_text}.

CONTENT TO ANALYZE:
{content}

CRITICAL REQUIREMENTS:
- You MUST generate exactly {question_count} questions - no more, no less
- Question types to include: {type_names}
- Difficulty level: {difficulty}
- Distribute questions evenly across the requested types ({distribution})
- Each question should test understanding of key concepts from the content
- Provide clear, accurate answers and explanations
- Ensure variety in question topics and concepts{variety}

MANDATORY RESPONSE FORMAT:
Generate ALL {question_count} questions using this EXACT format for each:

{QUESTION_START}
Type: [multiple-choice OR true-false]
Question: [Your question here]
{options_format}Answer: [Correct answer - for multiple-choice use letter (A, B, C, D), for true-false use "True" or "False"]
Explanation: [Detailed explanation of why this is correct]
Difficulty: {difficulty}
{QUESTION_END}

CRITICAL INSTRUCTIONS:
- Make questions that test genuine understanding, not just memorization
- Ensure all multiple-choice options are plausible
- Base questions directly on the provided content
- For {difficulty} difficulty: {difficulty_description}
- DO NOT STOP until you have generated ALL {question_count} questions
- Each question must have the complete {QUESTION_START}...{QUESTION_END} format

BEGIN GENERATING EXACTLY {question_count} QUESTIONS NOW:
"#
        )
    }

    fn truncate_source(&self, text: &str) -> String {
        let mut graphemes = text.graphemes(true);
        let head: String = graphemes.by_ref().take(self.max_source_chars).collect();
        if graphemes.next().is_some() {
            format!("{} ...", head)
        } else {
            head
        }
    }
}

fn distribution_line(question_count: usize, question_types: &[QuestionType]) -> String {
    if question_types.is_empty() {
        return String::new();
    }
    let per_type = question_count / question_types.len();
    question_types
        .iter()
        .map(|t| format!("{} {}", per_type, t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes a question in the same block format the prompt asks the model for.
pub fn render_block(question: &Question) -> String {
    let mut block = String::new();
    block.push_str(QUESTION_START);
    block.push('\n');
    block.push_str(&format!("Type: {}\n", question.question_type));
    block.push_str(&format!("Question: {}\n", question.question));

    if let Some(options) = &question.options {
        block.push_str("Options:\n");
        for (letter, option) in OPTION_LETTERS.iter().zip(options) {
            block.push_str(&format!("{}) {}\n", letter, option));
        }
    }

    let answer = match &question.correct_answer {
        CorrectAnswer::Index(idx) => OPTION_LETTERS
            .get(*idx)
            .map(|c| c.to_string())
            .unwrap_or_default(),
        CorrectAnswer::Text(text) => text.clone(),
    };
    block.push_str(&format!("Answer: {}\n", answer));
    block.push_str(&format!("Explanation: {}\n", question.explanation));
    block.push_str(&format!("Difficulty: {}\n", question.difficulty));
    block.push_str(QUESTION_END);
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(12_000)
    }

    #[test]
    fn states_exact_count_and_types() {
        let prompt = builder().build(
            "Photosynthesis converts light into chemical energy.",
            10,
            &[QuestionType::MultipleChoice, QuestionType::TrueFalse],
            Difficulty::Medium,
            None,
        );

        assert!(prompt.contains("Generate EXACTLY 10 high-quality quiz questions."));
        assert!(prompt.contains("exactly 10 questions - no more, no less"));
        assert!(prompt.contains("Question types to include: multiple-choice, true-false"));
        assert!(prompt.contains("(5 multiple-choice, 5 true-false)"));
        assert!(prompt.contains("Photosynthesis converts light"));
        assert!(prompt.contains(Difficulty::Medium.description()));
    }

    #[test]
    fn odd_split_uses_integer_division() {
        let prompt = builder().build(
            "text",
            7,
            &[QuestionType::MultipleChoice, QuestionType::TrueFalse],
            Difficulty::Easy,
            None,
        );
        assert!(prompt.contains("(3 multiple-choice, 3 true-false)"));
    }

    #[test]
    fn options_section_only_for_multiple_choice() {
        let tf_only =
            builder().build("text", 3, &[QuestionType::TrueFalse], Difficulty::Hard, None);
        assert!(!tf_only.contains("A) Option 1"));

        let mc =
            builder().build("text", 3, &[QuestionType::MultipleChoice], Difficulty::Hard, None);
        assert!(mc.contains("Options: [For multiple-choice only]\nA) Option 1"));
        assert!(mc.contains("D) Option 4"));
    }

    #[test]
    fn chunk_index_adds_variety_instruction() {
        let plain = builder().build("text", 5, &[QuestionType::TrueFalse], Difficulty::Easy, None);
        assert!(!plain.contains("(Set"));
        assert!(!plain.contains("previous sets"));

        let chunked =
            builder().build("text", 5, &[QuestionType::TrueFalse], Difficulty::Easy, Some(2));
        assert!(chunked.contains("quiz questions (Set 2)."));
        assert!(chunked.contains("Focus on different aspects of the content than previous sets"));
    }

    #[test]
    fn long_source_is_truncated_with_marker() {
        let source = "x".repeat(50);
        let prompt = PromptBuilder::new(20).build(
            &source,
            1,
            &[QuestionType::TrueFalse],
            Difficulty::Easy,
            None,
        );
        assert!(prompt.contains(&format!("{} ...", "x".repeat(20))));
        assert!(!prompt.contains(&"x".repeat(21)));

        let short = PromptBuilder::new(20).build(
            "short text",
            1,
            &[QuestionType::TrueFalse],
            Difficulty::Easy,
            None,
        );
        assert!(short.contains("short text\n"));
    }

    #[test]
    fn render_block_writes_letters_for_answers() {
        let question = Question {
            id: "q-0".to_string(),
            question_type: QuestionType::MultipleChoice,
            question: "Which?".to_string(),
            options: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
            correct_answer: CorrectAnswer::Index(2),
            explanation: "Because c.".to_string(),
            difficulty: Difficulty::Hard,
            source_file: "x.pdf".to_string(),
        };

        let block = render_block(&question);
        assert!(block.starts_with("QUESTION_START\nType: multiple-choice\n"));
        assert!(block.contains("C) c\n"));
        assert!(block.contains("Answer: C\n"));
        assert!(block.ends_with("QUESTION_END\n"));
    }
}
