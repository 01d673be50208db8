use crate::models::*;
use crate::prompt_builder::{QUESTION_END, QUESTION_START};
use regex::Regex;
use std::sync::OnceLock;

fn option_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-D])\)\s*(.*)$").expect("option pattern is valid"))
}

fn answer_letter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-D])").expect("answer pattern is valid"))
}

/// Turns a delimited model reply into questions. Broken blocks are dropped
/// one at a time; they never take their neighbours down with them.
pub struct ResponseParser {
    difficulty: Difficulty,
}

#[derive(Default)]
struct PartialQuestion {
    question_type: Option<QuestionType>,
    question: Option<String>,
    options: Option<Vec<String>>,
    answer: Option<String>,
    explanation: Option<String>,
    difficulty: Option<Difficulty>,
}

impl ResponseParser {
    /// `difficulty` is used for blocks that omit or garble `Difficulty:`.
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// `offset` shifts both the provisional ids and the source-file rotation so
    /// merged chunks stay distinct.
    pub fn parse(
        &self,
        generated_text: &str,
        file_names: &[String],
        offset: usize,
    ) -> Vec<Question> {
        let mut questions = Vec::new();

        for (i, segment) in generated_text.split(QUESTION_START).skip(1).enumerate() {
            let Some(end) = segment.find(QUESTION_END) else {
                log::warn!("Skipping question block {} without {}", offset + i, QUESTION_END);
                continue;
            };

            let lines: Vec<&str> = segment[..end]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            let position = offset + i;
            match self.parse_block(&lines, position, file_names) {
                Some(question) => questions.push(question),
                None => log::warn!("Dropping incomplete question block {}: {:?}", position, lines),
            }
        }

        log::info!("Parsed {} questions from model response", questions.len());
        questions
    }

    fn parse_block(
        &self,
        lines: &[&str],
        position: usize,
        file_names: &[String],
    ) -> Option<Question> {
        let mut partial = PartialQuestion::default();

        for line in lines {
            if let Some(value) = line.strip_prefix("Type:") {
                partial.question_type = QuestionType::parse(value);
            } else if let Some(value) = line.strip_prefix("Question:") {
                partial.question = non_empty(value);
            } else if line.starts_with("Options:") {
                partial.options = Some(Vec::new());
            } else if let Some(caps) = option_line().captures(line) {
                partial
                    .options
                    .get_or_insert_with(Vec::new)
                    .push(caps[2].trim().to_string());
            } else if let Some(value) = line.strip_prefix("Answer:") {
                partial.answer = non_empty(value);
            } else if let Some(value) = line.strip_prefix("Explanation:") {
                partial.explanation = non_empty(value);
            } else if let Some(value) = line.strip_prefix("Difficulty:") {
                partial.difficulty = Difficulty::parse(value);
            }
        }

        let question_type = partial.question_type?;
        let answer = partial.answer?;
        let (options, correct_answer) = match question_type {
            QuestionType::MultipleChoice => {
                let letter = answer_letter().captures(&answer)?[1].chars().next()?;
                let index = (letter as u8 - b'A') as usize;
                (partial.options, CorrectAnswer::Index(index))
            }
            QuestionType::TrueFalse => (None, CorrectAnswer::Text(normalize_true_false(&answer)?)),
        };

        let question = Question {
            id: format!("q-{}", position),
            question_type,
            question: partial.question?,
            options,
            correct_answer,
            explanation: partial.explanation?,
            difficulty: partial.difficulty.unwrap_or(self.difficulty),
            source_file: source_file_for(position, file_names),
        };

        question.is_well_formed().then_some(question)
    }
}

pub(crate) fn source_file_for(position: usize, file_names: &[String]) -> String {
    if file_names.is_empty() {
        return "unknown".to_string();
    }
    file_names[position % file_names.len()].clone()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn normalize_true_false(answer: &str) -> Option<String> {
    match answer.trim().to_lowercase().as_str() {
        "true" => Some("True".to_string()),
        "false" => Some("False".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_builder::render_block;

    fn files() -> Vec<String> {
        vec!["one.pdf".to_string(), "two.pdf".to_string()]
    }

    const WELL_FORMED: &str = r#"Here are your questions.

QUESTION_START
Type: multiple-choice
Question: What does active learning emphasise?
Options:
A) Passive listening
B) Student engagement
C) Memorisation
D) Standardised tests
Answer: B
Explanation: Active learning is built around engagement.
Difficulty: easy
QUESTION_END

QUESTION_START
Type: true-false
Question: Peer assessment is a modern assessment technique.
Answer: True
Explanation: Modern assessment includes peer review.
Difficulty: easy
QUESTION_END
"#;

    #[test]
    fn parses_mixed_blocks_in_order() {
        let questions = ResponseParser::new(Difficulty::Medium).parse(WELL_FORMED, &files(), 0);

        assert_eq!(questions.len(), 2);

        let mc = &questions[0];
        assert_eq!(mc.question_type, QuestionType::MultipleChoice);
        assert_eq!(mc.question, "What does active learning emphasise?");
        assert_eq!(mc.options.as_ref().map(Vec::len), Some(4));
        assert_eq!(mc.correct_answer, CorrectAnswer::Index(1));
        assert_eq!(mc.difficulty, Difficulty::Easy);
        assert_eq!(mc.source_file, "one.pdf");

        let tf = &questions[1];
        assert_eq!(tf.question_type, QuestionType::TrueFalse);
        assert_eq!(tf.options, None);
        assert_eq!(tf.correct_answer, CorrectAnswer::Text("True".to_string()));
        assert_eq!(tf.source_file, "two.pdf");
    }

    #[test]
    fn rendered_blocks_parse_back_to_same_fields() {
        let parser = ResponseParser::new(Difficulty::Medium);
        let original = parser.parse(WELL_FORMED, &files(), 0);

        let rendered: String = original.iter().map(render_block).collect();
        let reparsed = parser.parse(&rendered, &files(), 0);

        assert_eq!(original, reparsed);
    }

    #[test]
    fn block_missing_answer_does_not_affect_sibling() {
        let reply = r#"QUESTION_START
Type: true-false
Question: Metacognition is irrelevant to learning.
Explanation: It is very relevant.
Difficulty: hard
QUESTION_END
QUESTION_START
Type: true-false
Question: Blended learning mixes digital and classroom teaching.
Answer: True
Explanation: That is the definition.
Difficulty: hard
QUESTION_END"#;

        let questions = ResponseParser::new(Difficulty::Hard).parse(reply, &files(), 0);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Blended learning mixes digital and classroom teaching.");
        assert_eq!(questions[0].id, "q-1");
    }

    #[test]
    fn block_without_end_marker_is_skipped() {
        let reply = format!("{}\nQUESTION_START\nType: true-false\nQuestion: cut off", WELL_FORMED);
        let questions = ResponseParser::new(Difficulty::Easy).parse(&reply, &files(), 0);
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn unknown_type_and_bad_letter_are_dropped() {
        let reply = r#"QUESTION_START
Type: essay
Question: Discuss.
Answer: True
Explanation: n/a
QUESTION_END
QUESTION_START
Type: multiple-choice
Question: Pick one
Options:
A) x
B) y
Answer: Z
Explanation: none fit
QUESTION_END
QUESTION_START
Type: multiple-choice
Question: Pick another
Options:
A) x
B) y
Answer: D
Explanation: index out of range
QUESTION_END"#;

        let questions = ResponseParser::new(Difficulty::Easy).parse(reply, &files(), 0);
        assert!(questions.is_empty());
    }

    #[test]
    fn unrecognised_lines_and_case_variants_are_tolerated() {
        let reply = r#"QUESTION_START
Type: TRUE-FALSE
Note: this line is ignored
Question: Formative assessment gives ongoing feedback.
Answer: true
Explanation: That is its purpose.
Difficulty: extreme
QUESTION_END"#;

        let questions = ResponseParser::new(Difficulty::Medium).parse(reply, &files(), 0);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, CorrectAnswer::Text("True".to_string()));
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn offset_shifts_ids_and_source_rotation() {
        let questions = ResponseParser::new(Difficulty::Easy).parse(WELL_FORMED, &files(), 25);
        assert_eq!(questions[0].id, "q-25");
        assert_eq!(questions[0].source_file, "two.pdf");
        assert_eq!(questions[1].id, "q-26");
        assert_eq!(questions[1].source_file, "one.pdf");
    }

    #[test]
    fn text_without_markers_yields_nothing() {
        let questions =
            ResponseParser::new(Difficulty::Easy).parse("I cannot help with that.", &files(), 0);
        assert!(questions.is_empty());
    }

    #[test]
    fn empty_file_list_uses_unknown_source() {
        let questions = ResponseParser::new(Difficulty::Easy).parse(WELL_FORMED, &[], 0);
        assert_eq!(questions[0].source_file, "unknown");
    }
}
