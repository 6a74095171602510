//! # Matchers
//!
//! Matcher trees are built programmatically from the leaf and composite
//! types in this module, then driven by [`Matcher::apply`].
//!
//! * [`code_points`] - single code point leaves (literal, set, range,
//!   category, predicate, negation).
//! * [`combinators`] - [`AnyOf`], [`AllOf`], [`Optional`], [`NotMatch`],
//!   [`GhostMatch`].
//! * [`anchors`] - zero-width position anchors.
//! * [`lookaround`] - zero-width context tests against adjacent text.
//! * [`repeat`] - bounded repetition with optional alternate first/last
//!   matchers.

pub mod anchors;
pub mod categories;
pub mod code_points;
pub mod combinators;
pub mod lookaround;
pub mod repeat;

#[doc(inline)]
pub use anchors::{EndOfText, StartOfText};
#[doc(inline)]
pub use categories::CategoryMatcher;
#[doc(inline)]
pub use code_points::{
    CodePointPredicate, CodePointRange, CodePointRanges, CodePointSet, LiteralCodePoint,
    NegatedCodePoint,
};
#[doc(inline)]
pub use combinators::{AllOf, AnyOf, GhostMatch, NotMatch, Optional};
#[doc(inline)]
pub use lookaround::{
    LookAheadAnyString, LookAheadCodePoint, LookBehindAnyString, LookBehindCodePoint,
};
#[doc(inline)]
pub use repeat::{Repeat, Times};

use crate::navigator::Navigator;
use crate::types::CodePoint;

/// A matcher over a [`Navigator`].
///
/// `apply` consumes the caller's navigator copy and returns the advanced
/// navigator on success, or `None` on failure. Failure is expected and
/// cheap; callers that may retry keep their own copy ([`Navigator`] is
/// `Copy`). Protocol misuse (a pending ghost at the start of a match
/// step) panics instead.
pub trait Matcher: Send + Sync {
    /// Attempt a match at the navigator's scan position.
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>>;

    /// Is this a single-code-point matcher?
    ///
    /// Used to reject [`NotMatch`] over code-point matchers, which have
    /// their own negation form.
    fn is_code_point(&self) -> bool {
        false
    }

    /// Is this a negation?
    ///
    /// Used to reject double negation at construction.
    fn is_negation(&self) -> bool {
        false
    }

    /// Box this matcher for tree construction.
    fn boxed(self) -> Box<dyn Matcher>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// The pure single-code-point capability.
///
/// Negation and code-point lookaround query this without touching a
/// navigator; it is a capability orthogonal to [`Matcher`].
pub trait CodePointTest: Matcher {
    /// Does this matcher accept the code point?
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool;

    /// Box this test for composition.
    fn boxed_test(self) -> Box<dyn CodePointTest>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Shared `apply` for code-point leaves: peek, test, advance one code
/// point.
pub(crate) fn apply_code_point_test<'t>(
    test: &dyn CodePointTest,
    mut nav: Navigator<'t>,
) -> Option<Navigator<'t>> {
    nav.assert_settled();
    let cp = nav.peek_code_point()?;
    if test.test_code_point(cp) {
        nav.advance_capture_code_point();
        Some(nav)
    } else {
        None
    }
}
