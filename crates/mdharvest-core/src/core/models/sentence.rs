use crate::core::text::segmenter::SentenceSplitter;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize, // Position in the document, 0-based
    pub text: String, // Trimmed, never empty
}

/// An ordered, immutable sequence of sentences produced from one input text.
///
/// The sentence order is the order of appearance in the source text and is never re-sorted.
/// A `Document` can be iterated any number of times during the processing of one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    /// Segments `text` and materializes the resulting sentences.
    ///
    /// Empty or whitespace-only input produces an empty document.
    pub fn from_text(text: &str) -> Self {
        let sentences = SentenceSplitter::new(text)
            .enumerate()
            .map(|(index, text)| Sentence {
                index,
                text: text.to_string(),
            })
            .collect();
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// Returns the index of the first sentence containing `needle` as a literal substring.
    ///
    /// If the same sentence text occurs more than once, the first occurrence wins.
    pub fn position_of(&self, needle: &str) -> Option<usize> {
        self.sentences
            .iter()
            .position(|sentence| sentence.text.contains(needle))
    }

    /// Returns the range of sentence indices covered by the context window of `index`.
    ///
    /// The window holds the target sentence plus up to `radius` sentences on each side,
    /// shrinking at the document boundaries.
    pub fn context_span(&self, index: usize, radius: usize) -> Range<usize> {
        let start = index.saturating_sub(radius);
        let end = (index + radius + 1).min(self.sentences.len());
        start..end
    }

    /// Concatenates the context window of `index` with single spaces, in document order.
    pub fn context_window(&self, index: usize, radius: usize) -> String {
        let span = self.context_span(index, radius);
        self.sentences[span]
            .iter()
            .map(|sentence| sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_document(n: usize) -> Document {
        let text = (0..n)
            .map(|i| format!("Sentence number {}.", i))
            .collect::<Vec<_>>()
            .join(" ");
        Document::from_text(&text)
    }

    #[test]
    fn from_text_assigns_sequential_indices() {
        let doc = Document::from_text("First one. Second one? Third one.");
        assert_eq!(doc.len(), 3);
        for (i, sentence) in doc.iter().enumerate() {
            assert_eq!(sentence.index, i);
        }
        assert_eq!(doc.get(1).unwrap().text, "Second one?");
    }

    #[test]
    fn from_text_on_blank_input_is_empty() {
        assert!(Document::from_text("").is_empty());
        assert!(Document::from_text("   \n\t ").is_empty());
    }

    #[test]
    fn document_is_reiterable() {
        let doc = numbered_document(4);
        let first: Vec<_> = doc.iter().map(|s| s.text.clone()).collect();
        let second: Vec<_> = (&doc).into_iter().map(|s| s.text.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn position_of_resolves_to_first_matching_sentence() {
        let doc = Document::from_text("We used AlphaFold. Then AlphaFold again.");
        assert_eq!(doc.position_of("AlphaFold"), Some(0));
        assert_eq!(doc.position_of("again"), Some(1));
        assert_eq!(doc.position_of("RosettaFold"), None);
    }

    #[test]
    fn context_span_follows_window_law_for_every_index() {
        for n in 1..8 {
            let doc = numbered_document(n);
            assert_eq!(doc.len(), n);
            for i in 0..n {
                let span = doc.context_span(i, 2);
                let expected = i.min(2) + 1 + 2.min(n - 1 - i);
                assert_eq!(span.len(), expected, "n = {}, i = {}", n, i);
            }
        }
    }

    #[test]
    fn context_window_joins_neighbours_in_document_order() {
        let doc = numbered_document(6);
        assert_eq!(
            doc.context_window(0, 2),
            "Sentence number 0. Sentence number 1. Sentence number 2."
        );
        assert_eq!(
            doc.context_window(3, 2),
            "Sentence number 1. Sentence number 2. Sentence number 3. Sentence number 4. Sentence number 5."
        );
        assert_eq!(doc.context_window(5, 0), "Sentence number 5.");
    }
}
