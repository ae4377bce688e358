/// Lazily splits text into trimmed, non-empty sentences.
///
/// A boundary is a whitespace character directly preceded by `.` or `?`, except when the
/// characters before it look like an abbreviation:
///
/// - a word character, a period, a word character and one more character (`e.g.`, `i.e.`,
///   `U.S.`), or
/// - an uppercase letter, a lowercase letter and a period (`Dr.`, `Mr.`).
///
/// The splitter borrows the input; [`crate::core::models::sentence::Document`] materializes it.
#[derive(Debug, Clone)]
pub struct SentenceSplitter<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> SentenceSplitter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }
}

impl<'a> Iterator for SentenceSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.text.len() {
            let rest = &self.text[self.cursor..];
            let boundary = rest
                .char_indices()
                .map(|(offset, ch)| (self.cursor + offset, ch))
                .find(|&(pos, ch)| ch.is_whitespace() && is_boundary(self.text, pos));

            let segment = match boundary {
                Some((pos, ch)) => {
                    let segment = &self.text[self.cursor..pos];
                    self.cursor = pos + ch.len_utf8();
                    segment
                }
                None => {
                    self.cursor = self.text.len();
                    rest
                }
            };

            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        None
    }
}

/// Splits `text` eagerly. Convenience for callers that only need the strings.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SentenceSplitter::new(text).collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_boundary(text: &str, whitespace_pos: usize) -> bool {
    let mut preceding = text[..whitespace_pos].chars().rev();
    let c1 = preceding.next();
    let c2 = preceding.next();
    let c3 = preceding.next();
    let c4 = preceding.next();

    if !matches!(c1, Some('.') | Some('?')) {
        return false;
    }

    let dotted_abbreviation = matches!(
        (c4, c3, c2),
        (Some(a), Some('.'), Some(b)) if is_word_char(a) && is_word_char(b)
    );
    let title_abbreviation = c1 == Some('.')
        && matches!(
            (c3, c2),
            (Some(upper), Some(lower)) if upper.is_ascii_uppercase() && lower.is_ascii_lowercase()
        );

    !(dotted_abbreviation || title_abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_period_and_question_mark_followed_by_whitespace() {
        assert_eq!(
            split_sentences("The box was solvated. Was it neutral? Yes it was."),
            vec!["The box was solvated.", "Was it neutral?", "Yes it was."]
        );
    }

    #[test]
    fn does_not_split_without_trailing_whitespace() {
        assert_eq!(
            split_sentences("GROMACS 5.1.5 was used.No split here."),
            vec!["GROMACS 5.1.5 was used.No split here."]
        );
    }

    #[test]
    fn keeps_dotted_abbreviations_together() {
        assert_eq!(
            split_sentences("Several codes, e.g. 1QLX, were used. Done."),
            vec!["Several codes, e.g. 1QLX, were used.", "Done."]
        );
    }

    #[test]
    fn keeps_title_abbreviations_together() {
        assert_eq!(
            split_sentences("Data from Dr. Smith were used. Done."),
            vec!["Data from Dr. Smith were used.", "Done."]
        );
    }

    #[test]
    fn newlines_act_as_boundary_whitespace() {
        assert_eq!(
            split_sentences("First line.\nSecond line.\n\nThird line."),
            vec!["First line.", "Second line.", "Third line."]
        );
    }

    #[test]
    fn blank_input_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\t  ").is_empty());
    }

    #[test]
    fn handles_multibyte_characters_around_boundaries() {
        assert_eq!(
            split_sentences("Counterions Cl− were added. Temperature was 310 K."),
            vec!["Counterions Cl− were added.", "Temperature was 310 K."]
        );
    }

    #[test]
    fn splitter_can_be_restarted() {
        let text = "One. Two. Three.";
        let first: Vec<_> = SentenceSplitter::new(text).collect();
        let second: Vec<_> = SentenceSplitter::new(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
