//! # Group-Aware Matchers
//!
//! The capture-tree variants of the combinator family. Each group
//! matcher creates an unsealed branch node, threads its children's
//! captures into it, and on success seals it over the matched span and
//! attaches it (subject to anonymous folding) to the parent.

use crate::capture::tree::{CaptureTree, NodeId};
use crate::capture::CaptureMatcher;
use crate::matchers::repeat::{Phase, PhaseOutcome, Times};
use crate::matchers::Matcher;
use crate::navigator::Navigator;

/// Lifts a plain [`Matcher`] into the capture family as a named leaf.
///
/// An anonymous leaf still matches, but folds out of the tree.
pub struct CaptureLeaf {
    name: String,
    matcher: Box<dyn Matcher>,
}

impl CaptureLeaf {
    /// A leaf capturing `matcher`'s span under `name`.
    pub fn new(
        name: &str,
        matcher: Box<dyn Matcher>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            matcher,
        }
    }
}

impl CaptureMatcher for CaptureLeaf {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        let next = self.matcher.apply(nav)?;
        let leaf = tree.create(&self.name);
        tree.seal(leaf, nav.capture()..next.capture());
        tree.add_child(parent, leaf);
        Some(next)
    }
}

/// Capture variant of [`crate::matchers::AllOf`].
pub struct CaptureAll {
    name: String,
    children: Vec<Box<dyn CaptureMatcher>>,
}

impl CaptureAll {
    /// Match all children in order under a `name`d branch.
    pub fn new(
        name: &str,
        children: Vec<Box<dyn CaptureMatcher>>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            children,
        }
    }
}

impl CaptureMatcher for CaptureAll {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let mark = tree.mark();
        let node = tree.create(&self.name);
        let mut cur = nav;
        for child in &self.children {
            match child.apply(cur, tree, node) {
                Some(next) => cur = next,
                None => {
                    tree.rollback(mark);
                    return None;
                }
            }
        }
        tree.seal(node, nav.capture()..cur.capture());
        tree.add_child(parent, node);
        Some(cur)
    }
}

/// Capture variant of [`crate::matchers::AnyOf`].
pub struct CaptureAny {
    name: String,
    children: Vec<Box<dyn CaptureMatcher>>,
}

impl CaptureAny {
    /// Match the first successful child under a `name`d branch.
    pub fn new(
        name: &str,
        children: Vec<Box<dyn CaptureMatcher>>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            children,
        }
    }
}

impl CaptureMatcher for CaptureAny {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let mark = tree.mark();
        let node = tree.create(&self.name);
        for child in &self.children {
            let attempt = tree.mark();
            if let Some(next) = child.apply(nav, tree, node) {
                tree.seal(node, nav.capture()..next.capture());
                tree.add_child(parent, node);
                return Some(next);
            }
            tree.rollback(attempt);
        }
        tree.rollback(mark);
        None
    }
}

/// Capture variant of [`crate::matchers::Optional`].
///
/// A failed inner match is a zero-length success that records nothing.
pub struct CaptureOpt {
    name: String,
    inner: Box<dyn CaptureMatcher>,
}

impl CaptureOpt {
    /// Optionally match `inner` under a `name`d branch.
    pub fn new(
        name: &str,
        inner: Box<dyn CaptureMatcher>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            inner,
        }
    }
}

impl CaptureMatcher for CaptureOpt {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let mark = tree.mark();
        let node = tree.create(&self.name);
        match self.inner.apply(nav, tree, node) {
            Some(next) => {
                tree.seal(node, nav.capture()..next.capture());
                tree.add_child(parent, node);
                Some(next)
            }
            None => {
                tree.rollback(mark);
                Some(nav)
            }
        }
    }
}

/// Capture variant of [`crate::matchers::Repeat`].
///
/// Runs the same three-phase machine, threading a branch node; each
/// repetition's captures become children of the repeat's node.
pub struct CaptureRepeat {
    name: String,
    content: Box<dyn CaptureMatcher>,
    times: Times,
    alt_first: Option<Box<dyn CaptureMatcher>>,
    alt_last: Option<Box<dyn CaptureMatcher>>,
}

impl CaptureRepeat {
    /// Repeat `content` within `times` bounds under a `name`d branch.
    pub fn new(
        name: &str,
        content: Box<dyn CaptureMatcher>,
        times: Times,
    ) -> Self {
        Self {
            name: name.to_owned(),
            content,
            times,
            alt_first: None,
            alt_last: None,
        }
    }

    /// Substitute `alt` for the first repetition.
    pub fn with_alt_first(
        mut self,
        alt: Box<dyn CaptureMatcher>,
    ) -> Self {
        self.alt_first = Some(alt);
        self
    }

    /// Substitute `alt` for the last repetition.
    pub fn with_alt_last(
        mut self,
        alt: Box<dyn CaptureMatcher>,
    ) -> Self {
        self.alt_last = Some(alt);
        self
    }

    /// The greedy fast path: no alternates, repeat content up to `max`
    /// times, succeed iff at least `min` matched.
    fn apply_greedy<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        let mark = tree.mark();
        let node = tree.create(&self.name);
        let mut cur = nav;
        let mut count = 0;
        while count < self.times.max() {
            let attempt = tree.mark();
            match self.content.apply(cur, tree, node) {
                Some(next) if next.capture() > cur.capture() => {
                    cur = next;
                    count += 1;
                }
                Some(next) => {
                    // An empty success would repeat forever; stop.
                    cur = next;
                    break;
                }
                None => {
                    tree.rollback(attempt);
                    break;
                }
            }
        }
        if count >= self.times.min() {
            tree.seal(node, nav.capture()..cur.capture());
            tree.add_child(parent, node);
            Some(cur)
        } else {
            tree.rollback(mark);
            None
        }
    }

    /// One step of an alternate phase, rolled back unless it matched.
    fn apply_alt<'t>(
        alt: Option<&dyn CaptureMatcher>,
        cur: Navigator<'t>,
        tree: &mut CaptureTree,
        node: NodeId,
    ) -> (PhaseOutcome, Navigator<'t>) {
        match alt {
            None => (PhaseOutcome::Skipped, cur),
            Some(m) => {
                let attempt = tree.mark();
                match m.apply(cur, tree, node) {
                    Some(next) if next.capture() > cur.capture() => (PhaseOutcome::Matched, next),
                    Some(next) => (PhaseOutcome::Empty, next),
                    None => {
                        tree.rollback(attempt);
                        (PhaseOutcome::Failed, cur)
                    }
                }
            }
        }
    }
}

impl CaptureMatcher for CaptureRepeat {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        if self.alt_first.is_none() && self.alt_last.is_none() {
            return self.apply_greedy(nav, tree, parent);
        }
        let mark = tree.mark();
        let node = tree.create(&self.name);

        let mut cur = nav;
        let mut count: usize = 0;
        let mut failed = false;
        let mut content_matched = false;
        let mut phase = Phase::First;
        let beyond = self.times.max().saturating_add(1);

        while !failed && phase != Phase::Done && count < beyond {
            match phase {
                Phase::First => {
                    let (outcome, next) =
                        Self::apply_alt(self.alt_first.as_deref(), cur, tree, node);
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
                Phase::Content => {
                    let attempt = tree.mark();
                    match self.content.apply(cur, tree, node) {
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
                            tree.rollback(attempt);
                            if content_matched {
                                phase = Phase::Last;
                            } else {
                                failed = true;
                            }
                        }
                    }
                }
                Phase::Last => {
                    let (outcome, next) =
                        Self::apply_alt(self.alt_last.as_deref(), cur, tree, node);
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

        if !failed && self.times.contains(count) {
            tree.seal(node, nav.capture()..cur.capture());
            tree.add_child(parent, node);
            Some(cur)
        } else if failed && count == 0 && self.times.min() == 0 {
            // A zero-length success that records nothing.
            tree.rollback(mark);
            Some(nav)
        } else {
            tree.rollback(mark);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::tree::ANONYMOUS_NAME;
    use crate::capture::capture_match;
    use crate::matchers::{CategoryMatcher, LiteralCodePoint, Repeat};
    use crate::text::Utf16Text;

    fn digit_leaf(name: &str) -> Box<dyn CaptureMatcher> {
        CaptureLeaf::new(
            name,
            Repeat::new(
                CategoryMatcher::new("Nd").unwrap().boxed(),
                Times::one_or_more(),
            )
            .boxed(),
        )
        .boxed_capture()
    }

    fn lit_leaf(
        name: &str,
        c: char,
    ) -> Box<dyn CaptureMatcher> {
        CaptureLeaf::new(name, LiteralCodePoint::new(c).boxed()).boxed_capture()
    }

    #[test]
    fn test_named_leaf() {
        let text = Utf16Text::new("42x");
        let m = digit_leaf("num");
        let (tree, nav) = capture_match(m.as_ref(), Navigator::new(&text), "root").unwrap();

        assert_eq!(nav.capture_len(), 2);
        let kids = tree.children_named(tree.root(), "num");
        assert_eq!(kids.len(), 1);
        assert_eq!(tree.node(kids[0]).span(), 0..2);
    }

    #[test]
    fn test_anonymous_leaf_folds() {
        let text = Utf16Text::new("42");
        let m = digit_leaf(ANONYMOUS_NAME);
        let (tree, nav) = capture_match(m.as_ref(), Navigator::new(&text), "root").unwrap();

        assert_eq!(nav.capture_len(), 2);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_capture_all_rolls_back() {
        let m = CaptureAll::new(
            "pair",
            vec![lit_leaf("a", 'a'), lit_leaf("b", 'b')],
        );

        let text = Utf16Text::new("ab");
        let (tree, _) = capture_match(&m, Navigator::new(&text), "root").unwrap();
        let pair = tree.children_named(tree.root(), "pair")[0];
        assert_eq!(tree.node(pair).span(), 0..2);
        assert_eq!(tree.node(pair).children().len(), 2);

        let text = Utf16Text::new("ax");
        let mut tree = CaptureTree::new("root");
        let root = tree.root();
        let before = tree.mark();
        assert!(m.apply(Navigator::new(&text), &mut tree, root).is_none());
        // The failed attempt left no nodes behind.
        assert_eq!(tree.mark(), before);
    }

    #[test]
    fn test_capture_any_picks_first_success() {
        let m = CaptureAny::new(
            "alt",
            vec![lit_leaf("a", 'a'), lit_leaf("b", 'b')],
        );

        let text = Utf16Text::new("b");
        let (tree, _) = capture_match(&m, Navigator::new(&text), "root").unwrap();
        let alt = tree.children_named(tree.root(), "alt")[0];
        assert_eq!(tree.children_named(alt, "b").len(), 1);
        assert_eq!(tree.children_named(alt, "a").len(), 0);
    }

    #[test]
    fn test_capture_opt_failure_records_nothing() {
        let m = CaptureOpt::new("maybe", lit_leaf("a", 'a'));

        let text = Utf16Text::new("x");
        let (tree, nav) = capture_match(&m, Navigator::new(&text), "root").unwrap();
        assert_eq!(nav.capture_len(), 0);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_capture_repeat_children_per_repetition() {
        let m = CaptureRepeat::new(
            "list",
            CaptureAll::new(
                ANONYMOUS_NAME,
                vec![digit_leaf("n"), lit_leaf(ANONYMOUS_NAME, ';')],
            )
            .boxed_capture(),
            Times::between(1, 3).unwrap(),
        );

        let text = Utf16Text::new("1;22;333;");
        let (mut tree, nav) = capture_match(&m, Navigator::new(&text), "root").unwrap();
        assert_eq!(nav.capture_len(), 9);

        let list = tree.children_named(tree.root(), "list")[0];
        // Three anonymous branches, one per repetition.
        assert_eq!(tree.node(list).children().len(), 3);

        tree.prune(list);
        let nums = tree.children_named(list, "n");
        assert_eq!(nums.len(), 3);
        assert_eq!(tree.node(nums[2]).span(), 5..8);
    }

    #[test]
    fn test_capture_repeat_over_match_fails() {
        let m = CaptureRepeat::new(
            "list",
            lit_leaf(ANONYMOUS_NAME, 'a'),
            Times::between(1, 2).unwrap(),
        )
        .with_alt_last(lit_leaf(ANONYMOUS_NAME, 'b'));

        let text = Utf16Text::new("aab");
        let mut tree = CaptureTree::new("root");
        let root = tree.root();
        assert!(m.apply(Navigator::new(&text), &mut tree, root).is_none());
    }
}
