//! Prompt construction for plain-English rewriting

use lexplain_domain::DocumentType;

/// Builds the instructional prompt for one chunk
pub struct PromptBuilder<'a> {
    text: &'a str,
    document_type: DocumentType,
    is_part: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for `text`
    pub fn new(text: &'a str, document_type: DocumentType) -> Self {
        Self {
            text,
            document_type,
            is_part: false,
        }
    }

    /// Mark the text as one part of a larger document
    pub fn as_part(mut self, is_part: bool) -> Self {
        self.is_part = is_part;
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + 1_500);

        prompt.push_str(INSTRUCTIONS);
        if self.is_part {
            prompt.push_str(PART_NOTE);
        }
        prompt.push_str("\n\n");

        prompt.push_str(&format!("DOCUMENT TYPE: {}\n\n", self.document_type));

        prompt.push_str("ORIGINAL TEXT:\n");
        prompt.push_str(self.text);
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_REQUIREMENTS);
        prompt
    }
}

const INSTRUCTIONS: &str = r#"You are an expert legal document simplifier. Your task is to convert complex legal language into clear, plain English while maintaining accuracy and legal meaning.

INSTRUCTIONS:
1. Simplify complex legal jargon and archaic language
2. Replace "whereas", "heretofore", "hereinafter" and similar terms with plain language
3. Break down long sentences into shorter, clearer ones
4. Explain legal concepts in everyday terms
5. Maintain all essential legal meanings and obligations
6. Use active voice where possible
7. Replace complex phrases with simple equivalents"#;

const PART_NOTE: &str = "\nNOTE: This is part of a larger document. Focus on simplifying this section while keeping it coherent with the overall document structure.";

const OUTPUT_REQUIREMENTS: &str = r#"Please provide a simplified version that:
- Uses everyday language a general reader can understand
- Maintains all legal obligations and rights
- Preserves the original structure and intent
- Explains any unavoidable legal terms in parentheses

SIMPLIFIED VERSION:"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_text_and_type() {
        let prompt = PromptBuilder::new("The lessee shall pay.", DocumentType::Contract).build();

        assert!(prompt.contains("ORIGINAL TEXT:\nThe lessee shall pay."));
        assert!(prompt.contains("DOCUMENT TYPE: contract"));
        assert!(prompt.ends_with("SIMPLIFIED VERSION:"));
        assert!(!prompt.contains("part of a larger document"));
    }

    #[test]
    fn test_part_note() {
        let prompt = PromptBuilder::new("Text.", DocumentType::default())
            .as_part(true)
            .build();

        assert!(prompt.contains("part of a larger document"));
        assert!(prompt.contains("DOCUMENT TYPE: legal-document"));
    }
}
