//! # Repeat Matcher
//!
//! Bounded repetition of a content matcher, with optional alternate
//! matchers substituted for the first and last repetition.
//!
//! Without alternates the repeat is a plain greedy loop (the fast path;
//! measured ~2x faster than the phase machine, and kept as a distinct
//! code path). With alternates it runs an explicit three-phase machine:
//! First, then Content repeating, then Last.

use crate::errors::{MWResult, MatchweaveError};
use crate::matchers::Matcher;
use crate::navigator::Navigator;

/// Inclusive repetition bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Times {
    min: usize,
    max: usize,
}

impl Times {
    /// Exactly `n` repetitions.
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` repetitions, inclusive.
    ///
    /// ## Returns
    /// An error when `min > max`.
    pub fn between(
        min: usize,
        max: usize,
    ) -> MWResult<Self> {
        if min > max {
            return Err(MatchweaveError::MalformedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// At least `n` repetitions, unbounded above.
    pub fn at_least(n: usize) -> Self {
        Self {
            min: n,
            max: usize::MAX,
        }
    }

    /// One or more repetitions.
    pub fn one_or_more() -> Self {
        Self::at_least(1)
    }

    /// Zero or more repetitions.
    pub fn zero_or_more() -> Self {
        Self::at_least(0)
    }

    /// The lower bound.
    pub fn min(&self) -> usize {
        self.min
    }

    /// The upper bound.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Is `count` within the bounds?
    pub fn contains(
        &self,
        count: usize,
    ) -> bool {
        self.min <= count && count <= self.max
    }

    /// The first count past the upper bound.
    fn beyond(&self) -> usize {
        self.max.saturating_add(1)
    }
}

/// The phases of the full repeat machine, visited in strict order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    First,
    Content,
    Last,
    Done,
}

/// The outcome of one phase step.
///
/// `Skipped` (no alternate matcher configured) and `Failed` (a matcher
/// was attempted and failed) are deliberately distinct states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PhaseOutcome {
    Skipped,
    Matched,
    Empty,
    Failed,
}

/// Repeats a content matcher within [`Times`] bounds.
///
/// Alternate first/last matchers, when present, are attempted exactly
/// once each, before and after the content repetitions. With alternates
/// a repetition count beyond the upper bound fails the whole match; it
/// is never silently truncated.
pub struct Repeat {
    content: Box<dyn Matcher>,
    times: Times,
    alt_first: Option<Box<dyn Matcher>>,
    alt_last: Option<Box<dyn Matcher>>,
}

impl Repeat {
    /// Repeat `content` within `times` bounds.
    pub fn new(
        content: Box<dyn Matcher>,
        times: Times,
    ) -> Self {
        Self {
            content,
            times,
            alt_first: None,
            alt_last: None,
        }
    }

    /// Substitute `alt` for the first repetition.
    pub fn with_alt_first(
        mut self,
        alt: Box<dyn Matcher>,
    ) -> Self {
        self.alt_first = Some(alt);
        self
    }

    /// Substitute `alt` for the last repetition.
    pub fn with_alt_last(
        mut self,
        alt: Box<dyn Matcher>,
    ) -> Self {
        self.alt_last = Some(alt);
        self
    }

    /// The repetition bounds.
    pub fn times(&self) -> Times {
        self.times
    }

    /// The greedy fast path: no alternates, repeat content up to `max`
    /// times, succeed iff at least `min` matched.
    fn apply_greedy<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        let mut cur = nav;
        let mut count = 0;
        while count < self.times.max() {
            match self.content.apply(cur) {
                Some(next) if next.capture() > cur.capture() => {
                    cur = next;
                    count += 1;
                }
                Some(next) => {
                    // An empty success would repeat forever; stop.
                    cur = next;
                    break;
                }
                None => break,
            }
        }
        (count >= self.times.min()).then_some(cur)
    }

    /// One step of an alternate phase.
    fn apply_alt<'t>(
        alt: Option<&dyn Matcher>,
        cur: Navigator<'t>,
    ) -> (PhaseOutcome, Navigator<'t>) {
        match alt {
            None => (PhaseOutcome::Skipped, cur),
            Some(m) => match m.apply(cur) {
                Some(next) if next.capture() > cur.capture() => (PhaseOutcome::Matched, next),
                Some(next) => (PhaseOutcome::Empty, next),
                None => (PhaseOutcome::Failed, cur),
            },
        }
    }

    /// The full phase machine.
    fn apply_phases<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        let mut cur = nav;
        let mut count: usize = 0;
        let mut failed = false;
        let mut content_matched = false;
        let mut phase = Phase::First;

        while !failed && phase != Phase::Done && count < self.times.beyond() {
            match phase {
                Phase::First => {
                    let (outcome, next) = Self::apply_alt(self.alt_first.as_deref(), cur);
                    match outcome {
                        PhaseOutcome::Matched => {
                            count += 1;
                            cur = next;
                        }
                        PhaseOutcome::Empty => cur = next,
                        PhaseOutcome::Skipped => {}
                        PhaseOutcome::Failed => failed = true,
                    }
                    phase = Phase::Content;
                }
                Phase::Content => match self.content.apply(cur) {
                    Some(next) if next.capture() > cur.capture() => {
                        count += 1;
                        content_matched = true;
                        cur = next;
                    }
                    Some(next) => {
                        // An empty success ends the phase.
                        cur = next;
                        phase = Phase::Last;
                    }
                    None => {
                        if content_matched {
                            phase = Phase::Last;
                        } else {
                            failed = true;
                        }
                    }
                },
                Phase::Last => {
                    let (outcome, next) = Self::apply_alt(self.alt_last.as_deref(), cur);
                    match outcome {
                        PhaseOutcome::Matched => {
                            count += 1;
                            cur = next;
                        }
                        PhaseOutcome::Empty => cur = next,
                        PhaseOutcome::Skipped => {}
                        PhaseOutcome::Failed => failed = true,
                    }
                    phase = Phase::Done;
                }
                Phase::Done => unreachable!(),
            }
        }

        log::trace!(
            "repeat disposition: count={count} failed={failed} bounds={:?}",
            self.times,
        );

        if !failed && self.times.contains(count) {
            Some(cur)
        } else if failed && count == 0 && self.times.min() == 0 {
            // Nothing matched, nothing required: a zero-length success
            // on the original navigator.
            Some(nav)
        } else {
            None
        }
    }
}

impl Matcher for Repeat {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        if self.alt_first.is_none() && self.alt_last.is_none() {
            self.apply_greedy(nav)
        } else {
            self.apply_phases(nav)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{LiteralCodePoint, Optional};
    use crate::text::Utf16Text;

    fn lit(c: char) -> Box<dyn Matcher> {
        LiteralCodePoint::new(c).boxed()
    }

    fn opt(c: char) -> Box<dyn Matcher> {
        Optional::new(lit(c)).boxed()
    }

    fn capture(
        m: &Repeat,
        text: &str,
    ) -> Option<String> {
        let text = Utf16Text::new(text);
        m.apply(Navigator::new(&text))
            .and_then(|nav| text.decode_range(nav.matched_range()))
    }

    #[test]
    fn test_times_factories() {
        assert_eq!(Times::exactly(3), Times::between(3, 3).unwrap());
        assert_eq!(Times::one_or_more(), Times::at_least(1));
        assert_eq!(Times::zero_or_more().min(), 0);
        assert!(Times::zero_or_more().contains(1_000_000));

        assert!(matches!(
            Times::between(3, 2),
            Err(MatchweaveError::MalformedBounds { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_greedy_caps_at_max() {
        let m = Repeat::new(lit('A'), Times::between(1, 3).unwrap());
        assert_eq!(capture(&m, "AAAAA").as_deref(), Some("AAA"));
        assert_eq!(capture(&m, "A").as_deref(), Some("A"));
        assert_eq!(capture(&m, "B"), None);
    }

    #[test]
    fn test_greedy_under_min_fails() {
        let m = Repeat::new(lit('A'), Times::between(3, 5).unwrap());
        assert_eq!(capture(&m, "AAB"), None);
        assert_eq!(capture(&m, "AAAB").as_deref(), Some("AAA"));
    }

    #[test]
    fn test_greedy_zero_min() {
        let m = Repeat::new(lit('A'), Times::zero_or_more());
        assert_eq!(capture(&m, "BBB").as_deref(), Some(""));
        assert_eq!(capture(&m, "AAB").as_deref(), Some("AA"));
    }

    #[test]
    fn test_greedy_empty_success_stops() {
        // Optional content can succeed without advancing; the loop must
        // not spin on it.
        let m = Repeat::new(opt('A'), Times::zero_or_more());
        assert_eq!(capture(&m, "AAB").as_deref(), Some("AA"));
        assert_eq!(capture(&m, "B").as_deref(), Some(""));
    }

    #[test]
    fn test_alt_first_composition() {
        // Repeat(Opt("B"), between(2,3), altFirst=Opt("A"))
        let m = || {
            Repeat::new(opt('B'), Times::between(2, 3).unwrap())
                .with_alt_first(opt('A'))
        };

        assert_eq!(capture(&m(), "BB").as_deref(), Some("BB"));
        assert_eq!(capture(&m(), "AB").as_deref(), Some("AB"));
        // Trailing input is not consumed.
        assert_eq!(capture(&m(), "BBBA").as_deref(), Some("BBB"));
        // Over-match fails; it is not truncated.
        assert_eq!(capture(&m(), "BBBB"), None);
        // The alternate first consumes "A"; content then empty-matches
        // against "A", ending the phase under min.
        assert_eq!(capture(&m(), "AAB"), None);
    }

    #[test]
    fn test_alt_last() {
        // Content "a" 1..2 times, then an alternate last "b".
        let m = Repeat::new(lit('a'), Times::between(1, 2).unwrap()).with_alt_last(lit('b'));
        // "aab" over-matches: a, a, then b makes 3 > 2.
        assert_eq!(capture(&m, "aab"), None);
        // "ab": a then b = 2 matches.
        assert_eq!(capture(&m, "ab").as_deref(), Some("ab"));
        // A failing alternate last is a hard failure.
        assert_eq!(capture(&m, "ac"), None);
    }

    #[test]
    fn test_hard_failure_with_zero_min() {
        let m = Repeat::new(lit('a'), Times::between(0, 2).unwrap()).with_alt_last(lit('b'));
        // The last phase fails, but count == 0 and min == 0: a
        // zero-length success on the original navigator.
        let text = Utf16Text::new("xx");
        let nav = m.apply(Navigator::new(&text)).unwrap();
        assert_eq!(nav.capture_len(), 0);
    }

    #[test]
    fn test_content_first_failure_is_hard() {
        let m = Repeat::new(lit('a'), Times::between(1, 2).unwrap()).with_alt_last(lit('b'));
        assert_eq!(capture(&m, "xb"), None);
    }
}
