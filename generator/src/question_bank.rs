use crate::models::*;
use crate::response_parser::source_file_for;
use rand::seq::SliceRandom;
use rand::Rng;

struct ChoiceTemplate {
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: usize,
    explanation: &'static str,
}

struct TrueFalseTemplate {
    question: &'static str,
    correct_answer: bool,
    explanation: &'static str,
}

const EASY_CHOICE: &[ChoiceTemplate] = &[
    ChoiceTemplate {
        question: "What is the primary focus of active learning methodologies?",
        options: [
            "Passive information absorption",
            "Direct student engagement with material",
            "Teacher-centered instruction",
            "Standardized testing preparation",
        ],
        correct_answer: 1,
        explanation: "Active learning methodologies emphasize direct student engagement with the material through participation, discussion, and hands-on activities.",
    },
    ChoiceTemplate {
        question: "Which of the following is a benefit of active learning?",
        options: [
            "Reduced student participation",
            "Lower retention rates",
            "Better information retention",
            "Less critical thinking",
        ],
        correct_answer: 2,
        explanation: "Research shows that active learning leads to better information retention and deeper understanding compared to passive learning methods.",
    },
];

const MEDIUM_CHOICE: &[ChoiceTemplate] = &[
    ChoiceTemplate {
        question: "How do modern assessment techniques differ from traditional methods?",
        options: [
            "They focus solely on memorization",
            "They measure deep understanding through varied evaluation methods",
            "They only use multiple-choice formats",
            "They eliminate all forms of testing",
        ],
        correct_answer: 1,
        explanation: "Modern assessment techniques go beyond simple memorization to measure deep understanding through project-based evaluations, peer assessments, and self-reflection exercises.",
    },
    ChoiceTemplate {
        question: "What characterizes a blended learning environment?",
        options: [
            "Only online instruction",
            "Only traditional classroom teaching",
            "Integration of digital tools with traditional teaching methods",
            "Elimination of all technology",
        ],
        correct_answer: 2,
        explanation: "Blended learning combines digital tools with traditional teaching methods to create flexible, personalized learning experiences that accommodate different learning styles.",
    },
];

const HARD_CHOICE: &[ChoiceTemplate] = &[
    ChoiceTemplate {
        question: "What is the relationship between metacognitive skills and academic performance?",
        options: [
            "Metacognitive skills are irrelevant to academic success",
            "They help students monitor and regulate their own learning processes",
            "They only apply to advanced students",
            "They replace the need for content knowledge",
        ],
        correct_answer: 1,
        explanation: "Metacognitive skills enable students to monitor, evaluate, and regulate their own learning processes, leading to more effective learning strategies and improved academic performance.",
    },
    ChoiceTemplate {
        question: "How do quantitative and qualitative research methodologies complement each other?",
        options: [
            "They are mutually exclusive approaches",
            "Quantitative methods are always superior",
            "They provide different perspectives that together offer comprehensive insights",
            "Only qualitative methods are valid in education",
        ],
        correct_answer: 2,
        explanation: "Quantitative and qualitative research methodologies provide different but complementary perspectives, with mixed-method approaches offering more comprehensive insights into educational phenomena.",
    },
];

const EASY_TRUE_FALSE: &[TrueFalseTemplate] = &[
    TrueFalseTemplate {
        question: "Active learning strategies require students to participate directly in the learning process.",
        correct_answer: true,
        explanation: "This statement is true. Active learning strategies are specifically designed to engage students directly with the material through participation and interaction.",
    },
    TrueFalseTemplate {
        question: "Traditional passive learning methods are more effective than active learning approaches.",
        correct_answer: false,
        explanation: "This statement is false. Research consistently shows that active learning methodologies are more effective than traditional passive approaches for retention and understanding.",
    },
];

const MEDIUM_TRUE_FALSE: &[TrueFalseTemplate] = &[
    TrueFalseTemplate {
        question: "Blended learning environments only benefit students who prefer digital technology.",
        correct_answer: false,
        explanation: "This statement is false. Blended learning environments are designed to cater to different learning styles, benefiting students with various preferences, not just those who prefer technology.",
    },
    TrueFalseTemplate {
        question: "Modern assessment techniques include project-based evaluations and peer assessments.",
        correct_answer: true,
        explanation: "This statement is true. Modern assessment goes beyond traditional testing to include diverse evaluation methods like projects and peer assessments.",
    },
];

const HARD_TRUE_FALSE: &[TrueFalseTemplate] = &[
    TrueFalseTemplate {
        question: "The development of metacognitive skills requires only self-reflection exercises without external assessment.",
        correct_answer: false,
        explanation: "This statement is false. While self-reflection is important, metacognitive skills are best developed through a combination of self-reflection exercises and varied external assessment methods that provide feedback on learning processes.",
    },
    TrueFalseTemplate {
        question: "Research methodologies in education must exclusively use either quantitative or qualitative approaches.",
        correct_answer: false,
        explanation: "This statement is false. Mixed-method approaches that combine both quantitative and qualitative research methodologies are increasingly recognized as providing more comprehensive insights in educational research.",
    },
];

fn choice_pool(difficulty: Difficulty) -> &'static [ChoiceTemplate] {
    match difficulty {
        Difficulty::Easy => EASY_CHOICE,
        Difficulty::Medium => MEDIUM_CHOICE,
        Difficulty::Hard => HARD_CHOICE,
    }
}

fn true_false_pool(difficulty: Difficulty) -> &'static [TrueFalseTemplate] {
    match difficulty {
        Difficulty::Easy => EASY_TRUE_FALSE,
        Difficulty::Medium => MEDIUM_TRUE_FALSE,
        Difficulty::Hard => HARD_TRUE_FALSE,
    }
}

/// Canned questions used whenever the model can't supply enough of its own.
pub struct QuestionBank;

impl QuestionBank {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        question_count: usize,
        question_types: QuestionTypes,
        difficulty: Difficulty,
        file_names: &[String],
    ) -> Vec<Question> {
        self.generate_with_rng(
            question_count,
            question_types,
            difficulty,
            file_names,
            &mut rand::thread_rng(),
        )
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        question_count: usize,
        question_types: QuestionTypes,
        difficulty: Difficulty,
        file_names: &[String],
        rng: &mut R,
    ) -> Vec<Question> {
        let selected = question_types.selected();
        if selected.is_empty() || question_count == 0 {
            return Vec::new();
        }

        let per_type = question_count / selected.len();
        let mut remaining = question_count;
        let mut questions = Vec::new();

        if question_types.multiple_choice {
            let mc_count = if selected.len() == 1 { remaining } else { per_type };
            for i in 0..mc_count {
                questions.push(self.multiple_choice(i, difficulty, source_file_for(i, file_names)));
            }
            remaining -= mc_count;
        }

        if question_types.true_false {
            let base = if question_types.multiple_choice { per_type } else { 0 };
            for i in 0..remaining {
                let source_file = source_file_for(i, file_names);
                questions.push(self.true_false(base + i, difficulty, source_file));
            }
        }

        questions.shuffle(rng);
        questions.truncate(question_count);

        log::info!(
            "Generated {} fallback questions ({} difficulty)",
            questions.len(),
            difficulty
        );
        questions
    }

    fn multiple_choice(
        &self,
        index: usize,
        difficulty: Difficulty,
        source_file: String,
    ) -> Question {
        let pool = choice_pool(difficulty);
        let template = &pool[index % pool.len()];

        Question {
            id: format!("fallback-mc-{}", index),
            question_type: QuestionType::MultipleChoice,
            question: template.question.to_string(),
            options: Some(template.options.iter().map(|o| o.to_string()).collect()),
            correct_answer: CorrectAnswer::Index(template.correct_answer),
            explanation: template.explanation.to_string(),
            difficulty,
            source_file,
        }
    }

    fn true_false(&self, index: usize, difficulty: Difficulty, source_file: String) -> Question {
        let pool = true_false_pool(difficulty);
        let template = &pool[index % pool.len()];
        let answer = if template.correct_answer { "True" } else { "False" };

        Question {
            id: format!("fallback-tf-{}", index),
            question_type: QuestionType::TrueFalse,
            question: template.question.to_string(),
            options: None,
            correct_answer: CorrectAnswer::Text(answer.to_string()),
            explanation: template.explanation.to_string(),
            difficulty,
            source_file,
        }
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}
