//! # Text Scanner
//!
//! The find/find-all façade: walks a text, attempting a matcher tree at
//! each position, and yields an ordered sequence of match and fragment
//! tokens covering the scanned prefix.

use crate::matchers::Matcher;
use crate::navigator::Navigator;
use crate::text::Utf16Text;
use core::ops::Range;

/// Token Label/Range Reference for [`TextScanner`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenRef {
    /// A matched span.
    Match(Range<usize>),

    /// An unmatched gap between matches.
    Fragment(Range<usize>),
}

impl From<TokenRef> for Range<usize> {
    fn from(token: TokenRef) -> Self {
        match token {
            TokenRef::Match(range) => range,
            TokenRef::Fragment(range) => range,
        }
    }
}

/// Walks a text with a matcher tree, yielding [`TokenRef`]s.
pub struct TextScanner {
    matcher: Box<dyn Matcher>,
}

impl TextScanner {
    /// Scan with the given matcher.
    pub fn new(matcher: Box<dyn Matcher>) -> Self {
        Self { matcher }
    }

    /// Iterate over all [`TokenRef`]s in the text.
    ///
    /// The matcher is attempted on a fresh navigator at each scan
    /// position; a non-empty success emits any pending `Fragment`, then
    /// the `Match`, and resumes after it. A failure (or an empty match,
    /// which would not advance the scan) grows the current fragment by
    /// one code point.
    ///
    /// # Arguments
    /// * `text` - the text to scan.
    /// * `f` - the function to apply to each token;
    ///   halts when the function returns `false`.
    ///
    /// # Returns
    /// ``(completed, consumed)`` where:
    /// - `consumed` is the number of units covered by tokens accepted by `f`;
    /// - `completed` is if all tokens were accepted.
    pub fn for_each_token<F>(
        &self,
        text: &Utf16Text,
        f: &mut F,
    ) -> (bool, usize)
    where
        F: FnMut(TokenRef) -> bool,
    {
        let mut nav = Navigator::new(text);
        let mut frag_start = 0;

        while !nav.at_end() {
            match self.matcher.apply(nav.fresh_from_here()) {
                Some(done) if done.capture_len() > 0 => {
                    let range = done.matched_range();

                    if frag_start < range.start
                        && !f(TokenRef::Fragment(frag_start..range.start))
                    {
                        // Fragment Exit
                        return (false, frag_start);
                    }

                    if !f(TokenRef::Match(range.clone())) {
                        // Match Exit
                        return (false, range.start);
                    }

                    nav = Navigator::at(text, range.end);
                    frag_start = range.end;
                }
                _ => {
                    nav.advance_capture_code_point();
                }
            }
        }

        if frag_start < text.len() && !f(TokenRef::Fragment(frag_start..text.len())) {
            // Trailing Fragment Exit
            return (false, frag_start);
        }

        log::trace!("scan complete: {} units", text.len());
        (true, text.len())
    }

    /// Collect all [`TokenRef`]s in the text.
    pub fn find_all(
        &self,
        text: &Utf16Text,
    ) -> Vec<TokenRef> {
        let mut tokens = Vec::new();
        self.for_each_token(text, &mut |token| {
            tokens.push(token);
            true
        });
        tokens
    }

    /// The first matched range in the text, if any.
    pub fn find(
        &self,
        text: &Utf16Text,
    ) -> Option<Range<usize>> {
        let mut found = None;
        self.for_each_token(text, &mut |token| match token {
            TokenRef::Match(range) => {
                found = Some(range);
                false
            }
            TokenRef::Fragment(_) => true,
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{CategoryMatcher, Repeat, Times};
    use TokenRef::*;

    fn number_scanner() -> TextScanner {
        TextScanner::new(
            Repeat::new(
                CategoryMatcher::new("Nd").unwrap().boxed(),
                Times::one_or_more(),
            )
            .boxed(),
        )
    }

    #[test]
    fn test_find_all() {
        let text = Utf16Text::new("ab12cd345");
        assert_eq!(
            number_scanner().find_all(&text),
            vec![Fragment(0..2), Match(2..4), Fragment(4..6), Match(6..9)]
        );
    }

    #[test]
    fn test_find_all_no_match() {
        let text = Utf16Text::new("abc");
        assert_eq!(number_scanner().find_all(&text), vec![Fragment(0..3)]);

        let text = Utf16Text::new("");
        assert_eq!(number_scanner().find_all(&text), vec![]);
    }

    #[test]
    fn test_find() {
        let text = Utf16Text::new("ab12cd");
        assert_eq!(number_scanner().find(&text), Some(2..4));

        let text = Utf16Text::new("abcd");
        assert_eq!(number_scanner().find(&text), None);
    }

    #[test]
    fn test_fragment_spans_surrogates() {
        // The fragment advance is by code point: the emoji is one step
        // but two units.
        let text = Utf16Text::new("😀1");
        assert_eq!(
            number_scanner().find_all(&text),
            vec![Fragment(0..2), Match(2..3)]
        );
    }

    #[test]
    fn test_early_exit() {
        let scanner = number_scanner();
        let text = Utf16Text::new("ab12cd345");

        // Halt on the first match.
        let mut tokens = Vec::new();
        let (completed, consumed) = scanner.for_each_token(&text, &mut |token| match token {
            Match(_) => false,
            token => {
                tokens.push(token);
                true
            }
        });
        assert!(!completed);
        assert_eq!(consumed, 2);
        assert_eq!(tokens, vec![Fragment(0..2)]);

        // Halt on a fragment.
        let (completed, consumed) = scanner.for_each_token(&text, &mut |token| {
            !matches!(token, Fragment(_))
        });
        assert!(!completed);
        assert_eq!(consumed, 0);
    }
}
