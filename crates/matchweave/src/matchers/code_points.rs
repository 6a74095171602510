//! # Code-Point Leaf Matchers
//!
//! Each leaf matches exactly one code point at the cursor, advancing by
//! its 1-or-2-unit width. All leaves also expose the pure
//! [`CodePointTest`] capability used by negation and lookaround.

use crate::errors::{MWResult, MatchweaveError};
use crate::matchers::{CodePointTest, Matcher, apply_code_point_test};
use crate::navigator::Navigator;
use crate::types::{CodePoint, MWHashSet};

/// Matches one exact code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiteralCodePoint {
    cp: CodePoint,
}

impl LiteralCodePoint {
    /// Match the given character.
    pub fn new(c: char) -> Self {
        Self { cp: c as CodePoint }
    }

    /// Match the given code point value.
    pub fn from_code_point(cp: CodePoint) -> Self {
        Self { cp }
    }
}

impl Matcher for LiteralCodePoint {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for LiteralCodePoint {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        cp == self.cp
    }
}

/// Matches any code point accepted by a predicate function.
pub struct CodePointPredicate {
    test: Box<dyn Fn(CodePoint) -> bool + Send + Sync>,
}

impl CodePointPredicate {
    /// Match code points accepted by `test`.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(CodePoint) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Box::new(test),
        }
    }
}

impl Matcher for CodePointPredicate {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for CodePointPredicate {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        (self.test)(cp)
    }
}

/// Matches any code point in a set.
#[derive(Clone, Debug, Default)]
pub struct CodePointSet {
    set: MWHashSet<CodePoint>,
}

impl CodePointSet {
    /// Match any character of the given string.
    pub fn new<S: AsRef<str>>(chars: S) -> Self {
        Self {
            set: chars.as_ref().chars().map(|c| c as CodePoint).collect(),
        }
    }

    /// Match any of the given code points.
    pub fn from_code_points<I: IntoIterator<Item = CodePoint>>(cps: I) -> Self {
        Self {
            set: cps.into_iter().collect(),
        }
    }
}

impl Matcher for CodePointSet {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for CodePointSet {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        self.set.contains(&cp)
    }
}

/// Matches any code point in a contiguous inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePointRange {
    lo: CodePoint,
    hi: CodePoint,
}

impl CodePointRange {
    /// Match code points in `[lo, hi]`.
    ///
    /// ## Returns
    /// An error when `lo > hi`.
    pub fn new(
        lo: CodePoint,
        hi: CodePoint,
    ) -> MWResult<Self> {
        if lo > hi {
            return Err(MatchweaveError::MalformedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Match characters in `[lo, hi]`.
    pub fn from_chars(
        lo: char,
        hi: char,
    ) -> MWResult<Self> {
        Self::new(lo as CodePoint, hi as CodePoint)
    }

    /// Parse a 3-code-point pattern like `"A-Z"`.
    ///
    /// ## Returns
    /// An error unless the pattern is exactly `<lo>`, `-`, `<hi>`.
    pub fn from_pattern<S: AsRef<str>>(pattern: S) -> MWResult<Self> {
        let pattern = pattern.as_ref();
        let cps: Vec<char> = pattern.chars().collect();
        match cps.as_slice() {
            [lo, '-', hi] => Self::from_chars(*lo, *hi),
            _ => Err(MatchweaveError::MalformedRangePattern(pattern.into())),
        }
    }

    /// The inclusive range start.
    pub fn lo(&self) -> CodePoint {
        self.lo
    }

    /// The inclusive range end.
    pub fn hi(&self) -> CodePoint {
        self.hi
    }
}

impl Matcher for CodePointRange {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for CodePointRange {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        (self.lo..=self.hi).contains(&cp)
    }
}

/// Matches any code point in a union of ranges.
#[derive(Clone, Debug, Default)]
pub struct CodePointRanges {
    ranges: Vec<CodePointRange>,
}

impl CodePointRanges {
    /// Match the union of the given ranges.
    pub fn new<I: IntoIterator<Item = CodePointRange>>(ranges: I) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// Match the union of 3-code-point patterns like `["a-z", "A-Z"]`.
    pub fn from_patterns<I, S>(patterns: I) -> MWResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = patterns
            .into_iter()
            .map(CodePointRange::from_pattern)
            .collect::<MWResult<Vec<_>>>()?;
        Ok(Self { ranges })
    }
}

impl Matcher for CodePointRanges {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for CodePointRanges {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        self.ranges.iter().any(|r| r.test_code_point(cp))
    }
}

/// Matches any code point the inner test rejects.
pub struct NegatedCodePoint {
    inner: Box<dyn CodePointTest>,
}

impl NegatedCodePoint {
    /// Negate the inner test.
    ///
    /// ## Returns
    /// An error when the inner test is itself a negation.
    pub fn new(inner: Box<dyn CodePointTest>) -> MWResult<Self> {
        if inner.is_negation() {
            return Err(MatchweaveError::IllegalComposition(
                "double negation of a code point matcher",
            ));
        }
        Ok(Self { inner })
    }
}

impl Matcher for NegatedCodePoint {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }

    fn is_negation(&self) -> bool {
        true
    }
}

impl CodePointTest for NegatedCodePoint {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        !self.inner.test_code_point(cp)
    }
}
