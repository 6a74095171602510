//! # Composite Matchers
//!
//! The composites delegate to child matchers, copying the navigator
//! before any attempt that may need a retry.

use crate::errors::{MWResult, MatchweaveError};
use crate::matchers::Matcher;
use crate::navigator::Navigator;

/// Matches the first child that succeeds.
///
/// Each child is tried on its own copy of the navigator; fails only when
/// all children fail.
#[derive(Default)]
pub struct AnyOf {
    children: Vec<Box<dyn Matcher>>,
}

impl AnyOf {
    /// Match any of the given children, in order.
    pub fn new(children: Vec<Box<dyn Matcher>>) -> Self {
        Self { children }
    }
}

impl Matcher for AnyOf {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        self.children.iter().find_map(|child| child.apply(nav))
    }
}

/// Matches all children in order, threading the live navigator.
///
/// The empty list is the identity: a no-op success.
#[derive(Default)]
pub struct AllOf {
    children: Vec<Box<dyn Matcher>>,
}

impl AllOf {
    /// Match all of the given children, in order.
    pub fn new(children: Vec<Box<dyn Matcher>>) -> Self {
        Self { children }
    }
}

impl Matcher for AllOf {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let mut cur = nav;
        for child in &self.children {
            cur = child.apply(cur)?;
        }
        Some(cur)
    }
}

/// Matches the inner matcher, or succeeds without advancing.
///
/// Never fails: when the inner matcher fails, the caller's untouched
/// copy is returned as a zero-length success.
pub struct Optional {
    inner: Box<dyn Matcher>,
}

impl Optional {
    /// Optionally match `inner`.
    pub fn new(inner: Box<dyn Matcher>) -> Self {
        Self { inner }
    }
}

impl Matcher for Optional {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        self.inner.apply(nav).or(Some(nav))
    }
}

/// Succeeds, zero-width, iff the inner matcher fails.
pub struct NotMatch {
    inner: Box<dyn Matcher>,
}

impl NotMatch {
    /// Negate `inner`.
    ///
    /// ## Returns
    /// An error when `inner` is a code-point matcher (use
    /// [`crate::matchers::NegatedCodePoint`]) or another negation.
    pub fn new(inner: Box<dyn Matcher>) -> MWResult<Self> {
        if inner.is_code_point() {
            return Err(MatchweaveError::IllegalComposition(
                "NotMatch over a code point matcher; use NegatedCodePoint",
            ));
        }
        if inner.is_negation() {
            return Err(MatchweaveError::IllegalComposition(
                "double negation",
            ));
        }
        Ok(Self { inner })
    }
}

impl Matcher for NotMatch {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        match self.inner.apply(nav) {
            Some(_) => None,
            None => Some(nav),
        }
    }

    fn is_negation(&self) -> bool {
        true
    }
}

/// Matches the inner matcher as a lookahead, committing nothing.
///
/// On success only the ghost position advances, by the inner capture
/// length. A ghost match must be the final step of a sequence; any
/// further match step on the ghost-pending navigator panics.
pub struct GhostMatch {
    inner: Box<dyn Matcher>,
}

impl GhostMatch {
    /// Ghost-match `inner` at the cursor.
    pub fn new(inner: Box<dyn Matcher>) -> Self {
        Self { inner }
    }
}

impl Matcher for GhostMatch {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let sub = self.inner.apply(nav.fresh_from_here())?;
        let mut out = nav;
        out.advance_ghost(sub.capture_len());
        Some(out)
    }
}
