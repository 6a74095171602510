//! # Position Anchors
//!
//! Zero-width matchers on the cursor position itself.

use crate::matchers::Matcher;
use crate::navigator::Navigator;

/// Succeeds, zero-width, iff the cursor is at the start of the text.
#[derive(Clone, Copy, Debug, Default)]
pub struct StartOfText;

impl Matcher for StartOfText {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        (nav.nav() == 0).then_some(nav)
    }
}

/// Succeeds, zero-width, iff the cursor is at the end of the text.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndOfText;

impl Matcher for EndOfText {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        nav.at_end().then_some(nav)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{AllOf, LiteralCodePoint};
    use crate::text::Utf16Text;

    #[test]
    fn test_anchors() {
        let text = Utf16Text::new("a");

        let m = AllOf::new(vec![
            StartOfText.boxed(),
            LiteralCodePoint::new('a').boxed(),
            EndOfText.boxed(),
        ]);
        assert_eq!(m.apply(Navigator::new(&text)).unwrap().capture_len(), 1);

        let text = Utf16Text::new("ab");
        assert!(m.apply(Navigator::new(&text)).is_none());
    }

    #[test]
    fn test_empty_text() {
        let text = Utf16Text::new("");
        let nav = Navigator::new(&text);
        assert!(StartOfText.apply(nav).is_some());
        assert!(EndOfText.apply(nav).is_some());
    }
}
