//! Sentence-preserving text chunking for large documents

/// Splits text into chunks that never break a sentence
///
/// Sizes are measured in characters, not bytes.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_size: usize,
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace. The
/// punctuation stays with its sentence, the whitespace is dropped and empty
/// pieces are skipped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, d)) = chars.peek() {
            if !is_terminal(d) {
                break;
            }
            end = j + d.len_utf8();
            chars.next();
        }

        if !matches!(chars.peek(), Some(&(_, d)) if d.is_whitespace()) {
            continue;
        }

        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }

        start = text.len();
        while let Some(&(j, d)) = chars.peek() {
            if !d.is_whitespace() {
                start = j;
                break;
            }
            chars.next();
        }
    }

    if start < text.len() {
        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }
    }

    sentences
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Maximum chunk size in characters
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Chunk the given text
    ///
    /// Text within the budget comes back unchanged as a single chunk. Longer
    /// text is split into sentences that are greedily packed, joined by single
    /// spaces. A sentence longer than the budget becomes its own chunk.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.chars().count() <= self.max_chunk_size {
            return vec![text.to_string()];
        }

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for sentence in sentences {
            let len = sentence.chars().count();
            let joined_len = if current.is_empty() {
                len
            } else {
                current_len + 1 + len
            };

            if joined_len > self.max_chunk_size && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current.push_str(sentence);
                current_len = len;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(sentence);
                current_len = joined_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        let chunker = TextChunker::new(100);
        let text = "Short text here.  With odd   spacing!";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_split_sentences_keeps_punctuation() {
        let sentences = split_sentences("First one. Second?! Third!\n\nFourth without end");
        assert_eq!(
            sentences,
            vec!["First one.", "Second?!", "Third!", "Fourth without end"]
        );
    }

    #[test]
    fn test_split_ignores_inner_punctuation() {
        let sentences = split_sentences("Pay $1.50 per unit. Section 4.2 applies.");
        assert_eq!(sentences, vec!["Pay $1.50 per unit.", "Section 4.2 applies."]);
    }

    #[test]
    fn test_chunks_pack_sentences() {
        let chunker = TextChunker::new(30);
        let text = "First sentence here. Second sentence here. Third sentence here.";
        let chunks = chunker.chunk(text);

        assert_eq!(
            chunks,
            vec![
                "First sentence here.",
                "Second sentence here.",
                "Third sentence here."
            ]
        );
    }

    #[test]
    fn test_boundary_fits_exactly() {
        // "aaaa. bbbb." is 11 characters
        let chunker = TextChunker::new(11);
        let chunks = chunker.chunk("aaaa. bbbb. cccc.");
        assert_eq!(chunks, vec!["aaaa. bbbb.", "cccc."]);
    }

    #[test]
    fn test_oversized_sentence_is_its_own_chunk() {
        let chunker = TextChunker::new(20);
        let long = format!("{}.", "x".repeat(50));
        let text = format!("Short one. {} Tail.", long);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks, vec!["Short one.".to_string(), long, "Tail.".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::new(100);
        assert_eq!(chunker.chunk(""), vec![String::new()]);
    }

    #[test]
    fn test_no_sentence_content() {
        let chunker = TextChunker::new(3);
        let text = "   \n\n   ";
        assert_eq!(chunker.chunk(text), vec![text.to_string()]);
    }

    #[test]
    fn test_budget_counts_characters() {
        let chunker = TextChunker::new(10);
        // Ten characters, more than ten bytes
        let text = "§§§§§§§§§.";
        assert_eq!(chunker.chunk(text).len(), 1);
    }

    fn sentence() -> impl Strategy<Value = String> {
        (
            prop::collection::vec("[a-z]{1,8}", 1..12),
            prop::sample::select(vec![".", "!", "?", "?!"]),
        )
            .prop_map(|(words, end)| format!("{}{}", words.join(" "), end))
    }

    fn document() -> impl Strategy<Value = (Vec<String>, String)> {
        (
            prop::collection::vec(sentence(), 1..40),
            prop::sample::select(vec![" ", "  ", "\n", "\n\n", " \t "]),
        )
            .prop_map(|(sentences, sep)| {
                let text = sentences.join(sep);
                (sentences, text)
            })
    }

    proptest! {
        #[test]
        fn prop_chunking_preserves_content((sentences, text) in document(), budget in 1usize..400) {
            let chunks = TextChunker::new(budget).chunk(&text);
            if text.chars().count() <= budget {
                prop_assert_eq!(chunks, vec![text]);
            } else {
                prop_assert_eq!(chunks.join(" "), sentences.join(" "));
            }
        }

        #[test]
        fn prop_chunks_respect_budget((_sentences, text) in document(), budget in 1usize..400) {
            for chunk in TextChunker::new(budget).chunk(&text) {
                prop_assert!(
                    chunk.chars().count() <= budget || split_sentences(&chunk).len() == 1,
                    "chunk over budget with more than one sentence: {:?}",
                    chunk
                );
            }
        }

        #[test]
        fn prop_non_empty_input_gives_chunks((_sentences, text) in document(), budget in 1usize..400) {
            let chunks = TextChunker::new(budget).chunk(&text);
            prop_assert!(!chunks.is_empty());
            prop_assert!(chunks.iter().all(|c| !c.is_empty()));
        }
    }
}
