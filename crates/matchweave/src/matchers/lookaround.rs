//! # Lookaround Matchers
//!
//! Zero-width tests against the text adjacent to the cursor. The
//! code-point forms query a [`CodePointTest`] via peek; the any-string
//! forms probe a [`PrefixIndex`] at every distinct indexed key length.
//!
//! Look-behind matchers describe what precedes the match attempt, so
//! they require a fresh navigator; applying one mid-match panics.

use crate::errors::MWResult;
use crate::matchers::{CodePointTest, Matcher};
use crate::navigator::Navigator;
use crate::prefix_index::PrefixIndex;

/// Succeeds, zero-width, iff the code point before the cursor passes.
pub struct LookBehindCodePoint {
    test: Box<dyn CodePointTest>,
}

impl LookBehindCodePoint {
    /// Test the code point immediately before the cursor.
    pub fn new(test: Box<dyn CodePointTest>) -> Self {
        Self { test }
    }
}

impl Matcher for LookBehindCodePoint {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_fresh();
        let cp = nav.peek_code_point_before()?;
        self.test.test_code_point(cp).then_some(nav)
    }
}

/// Succeeds, zero-width, iff the code point at the cursor passes.
pub struct LookAheadCodePoint {
    test: Box<dyn CodePointTest>,
}

impl LookAheadCodePoint {
    /// Test the code point at the cursor, without advancing.
    pub fn new(test: Box<dyn CodePointTest>) -> Self {
        Self { test }
    }
}

impl Matcher for LookAheadCodePoint {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let cp = nav.peek_code_point()?;
        self.test.test_code_point(cp).then_some(nav)
    }
}

/// Succeeds, zero-width, iff any indexed string ends at the cursor.
pub struct LookBehindAnyString {
    index: PrefixIndex,
}

impl LookBehindAnyString {
    /// Test against the given index.
    pub fn new(index: PrefixIndex) -> Self {
        Self { index }
    }

    /// Test against the given candidate strings.
    pub fn from_strings<I, S>(entries: I) -> MWResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(PrefixIndex::from_strings(entries)?))
    }
}

impl Matcher for LookBehindAnyString {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_fresh();
        for &len in self.index.all_key_lengths() {
            if let Some(slice) = nav.peek_slice_before(len)
                && self.index.has_slice(slice)
            {
                return Some(nav);
            }
        }
        None
    }
}

/// Succeeds, zero-width, iff any indexed string starts at the cursor.
pub struct LookAheadAnyString {
    index: PrefixIndex,
}

impl LookAheadAnyString {
    /// Test against the given index.
    pub fn new(index: PrefixIndex) -> Self {
        Self { index }
    }

    /// Test against the given candidate strings.
    pub fn from_strings<I, S>(entries: I) -> MWResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(PrefixIndex::from_strings(entries)?))
    }
}

impl Matcher for LookAheadAnyString {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        for &len in self.index.all_key_lengths() {
            if let Some(slice) = nav.peek_slice_after(len)
                && self.index.has_slice(slice)
            {
                return Some(nav);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{CategoryMatcher, LiteralCodePoint};
    use crate::text::Utf16Text;

    #[test]
    fn test_look_behind_code_point() {
        let m = LookBehindCodePoint::new(CategoryMatcher::new("Nd").unwrap().boxed_test());

        let text = Utf16Text::new("7x");
        let mut nav = Navigator::new(&text);
        nav.commit_and_reset(1);
        let out = m.apply(nav).unwrap();
        assert_eq!(out.capture_len(), 0);
        assert_eq!(out.nav(), 1);

        // Nothing before the start of text.
        let nav = Navigator::new(&text);
        assert!(m.apply(nav).is_none());
    }

    #[test]
    #[should_panic(expected = "mid-match")]
    fn test_look_behind_requires_fresh() {
        let m = LookBehindCodePoint::new(LiteralCodePoint::new('a').boxed_test());
        let text = Utf16Text::new("ab");
        let mut nav = Navigator::new(&text);
        nav.advance_capture(1);
        let _ = m.apply(nav);
    }

    #[test]
    fn test_look_ahead_code_point() {
        let m = LookAheadCodePoint::new(LiteralCodePoint::new('x').boxed_test());

        let text = Utf16Text::new("x");
        assert_eq!(
            m.apply(Navigator::new(&text)).unwrap().capture_len(),
            0
        );

        let text = Utf16Text::new("y");
        assert!(m.apply(Navigator::new(&text)).is_none());

        let text = Utf16Text::new("");
        assert!(m.apply(Navigator::new(&text)).is_none());
    }

    #[test]
    fn test_look_behind_any_string() {
        let m = LookBehindAnyString::from_strings(["ab", "xyz"]).unwrap();

        let text = Utf16Text::new("ab!");
        let mut nav = Navigator::new(&text);
        nav.commit_and_reset(2);
        assert!(m.apply(nav).is_some());

        // "b!" / "ab!"-suffixes match no entry.
        let mut nav = Navigator::new(&text);
        nav.commit_and_reset(3);
        assert!(m.apply(nav).is_none());
    }

    #[test]
    fn test_look_ahead_any_string() {
        let m = LookAheadAnyString::from_strings(["ab", "a😀"]).unwrap();

        let text = Utf16Text::new("a😀b");
        assert!(m.apply(Navigator::new(&text)).is_some());

        let text = Utf16Text::new("ax");
        assert!(m.apply(Navigator::new(&text)).is_none());
    }
}
