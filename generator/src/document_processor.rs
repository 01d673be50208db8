use crate::error::{GenerationError, GenerationOutcome};
use crate::models::*;

pub const DOCUMENT_SEPARATOR: &str = "\n\n--- NEW DOCUMENT ---\n\n";
const CHARS_PER_PAGE: usize = 2000;

// Stand-in for real text extraction; every upload reads as this chapter.
const PLACEHOLDER_CHAPTER: &str = r#"Chapter: Advanced Learning Methodologies and Educational Psychology

Introduction:
This chapter explores modern educational approaches that have revolutionized teaching and learning processes. The content covers active learning strategies, assessment techniques, and the integration of technology in educational environments.

Key Concepts:

1. Active Learning Strategies
Active learning methodologies emphasize student engagement and participation rather than passive information consumption. These approaches include:
- Collaborative learning exercises
- Problem-based learning scenarios
- Interactive discussions and debates
- Hands-on experimentation and discovery
- Peer teaching and knowledge sharing

Research demonstrates that active learning leads to improved retention rates, deeper understanding, and enhanced critical thinking skills. Students who engage with material through active participation show significantly better academic outcomes.

2. Assessment and Evaluation Methods
Modern assessment goes beyond traditional testing to include:
- Formative assessments that provide ongoing feedback
- Portfolio-based evaluations
- Project-based learning assessments
- Peer and self-assessment techniques
- Authentic assessment in real-world contexts

These varied assessment methods help measure not just knowledge retention but also skill application, critical thinking, and problem-solving abilities.

3. Technology Integration
The integration of technology in education creates blended learning environments that:
- Accommodate different learning styles
- Provide personalized learning experiences
- Enable collaborative work across distances
- Offer immediate feedback and adaptive content
- Support multimedia learning resources

4. Research Methodologies in Education
Educational research employs both quantitative and qualitative approaches:
- Quantitative methods provide statistical analysis of learning outcomes
- Qualitative methods offer deep insights into learning experiences
- Mixed-method approaches combine both for comprehensive understanding
- Action research allows educators to study their own teaching practices

5. Metacognitive Development
Developing metacognitive skills helps students:
- Understand their own learning processes
- Monitor their comprehension and progress
- Regulate their learning strategies
- Reflect on their academic performance
- Transfer learning skills across different subjects

Applications and Implications:
These methodologies find application across various educational levels, from elementary education through higher education and professional development. The emphasis on learner-centered approaches, continuous feedback, and technology integration represents a significant shift from traditional educational models."#;

pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process_upload(
        &self,
        file_name: &str,
        file_content: &str,
    ) -> GenerationOutcome<ExtractedDocument> {
        if file_name.trim().is_empty() || file_content.trim().is_empty() {
            return Err(GenerationError::validation("fileName and fileContent are required"));
        }

        log::info!("Processing PDF: {}", file_name);

        let extracted_text = self.extract_text(file_name);
        let page_count = estimate_page_count(&extracted_text);

        Ok(ExtractedDocument {
            file_name: file_name.to_string(),
            extracted_text,
            page_count,
        })
    }

    /// All uploads joined into one corpus, each tagged with its file name.
    pub fn combined_text(&self, files: &[SourceFile]) -> String {
        let texts: Vec<String> = files
            .iter()
            .map(|file| {
                format!(
                    "Content from file: {}\n\n{}",
                    file.name,
                    self.extract_text(&file.name)
                )
            })
            .collect();

        log::info!("Processed {} documents", texts.len());
        texts.join(DOCUMENT_SEPARATOR)
    }

    fn extract_text(&self, _file_name: &str) -> String {
        PLACEHOLDER_CHAPTER.to_string()
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn estimate_page_count(text: &str) -> usize {
    let chars = text.chars().count();
    chars.div_ceil(CHARS_PER_PAGE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_estimate_rounds_up_with_minimum_of_one() {
        assert_eq!(estimate_page_count(""), 1);
        assert_eq!(estimate_page_count(&"a".repeat(2000)), 1);
        assert_eq!(estimate_page_count(&"a".repeat(2001)), 2);
        assert_eq!(estimate_page_count(&"a".repeat(4500)), 3);
    }

    #[test]
    fn upload_requires_name_and_content() {
        let processor = DocumentProcessor::new();
        assert!(matches!(
            processor.process_upload("", "JVBERi0="),
            Err(GenerationError::Validation(_))
        ));
        assert!(matches!(
            processor.process_upload("a.pdf", "  "),
            Err(GenerationError::Validation(_))
        ));
    }

    #[test]
    fn upload_returns_placeholder_text_and_pages() {
        let doc = DocumentProcessor::new().process_upload("a.pdf", "JVBERi0=").unwrap();
        assert_eq!(doc.file_name, "a.pdf");
        assert!(doc.extracted_text.starts_with("Chapter:"));
        assert_eq!(doc.page_count, estimate_page_count(PLACEHOLDER_CHAPTER));
    }

    #[test]
    fn combined_text_separates_documents() {
        let files = vec![
            SourceFile { name: "a.pdf".to_string(), content: String::new() },
            SourceFile { name: "b.pdf".to_string(), content: String::new() },
        ];
        let text = DocumentProcessor::new().combined_text(&files);
        assert_eq!(text.matches(DOCUMENT_SEPARATOR).count(), 1);
        assert!(text.starts_with("Content from file: a.pdf"));
        assert!(text.contains("Content from file: b.pdf"));
    }
}
