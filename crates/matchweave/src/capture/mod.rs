//! # Capture-Tree Matchers
//!
//! A parallel combinator family that produces a named-group tree while
//! matching. Group matchers thread both a [`Navigator`] and a
//! [`CaptureTree`]; failed attempts roll the tree back to a mark the
//! same way plain matchers discard a navigator copy.
//!
//! * [`tree`] - the arena tree, seal protocol, folding, and pruning.
//! * [`groups`] - the group-aware leaf/all/any/opt/repeat matchers.
//! * [`splitter`] - delimiter-driven text splitting into `:fragment`
//!   groups.

pub mod groups;
pub mod splitter;
pub mod tree;

#[doc(inline)]
pub use groups::{CaptureAll, CaptureAny, CaptureLeaf, CaptureOpt, CaptureRepeat};
#[doc(inline)]
pub use splitter::CaptureSplit;
#[doc(inline)]
pub use tree::{ANONYMOUS_NAME, CaptureNode, CaptureTree, FRAGMENT_NAME, NodeId};

use crate::navigator::Navigator;

/// A matcher that records named capture spans while matching.
pub trait CaptureMatcher: Send + Sync {
    /// Attempt a match, attaching capture nodes under `parent` on
    /// success. On failure the tree must be left as it was found.
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>>;

    /// Box this matcher for tree construction.
    fn boxed_capture(self) -> Box<dyn CaptureMatcher>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Drive a capture matcher over a fresh navigator, producing the tree.
///
/// ## Returns
/// `Some((tree, end_navigator))` on success.
pub fn capture_match<'t>(
    matcher: &dyn CaptureMatcher,
    nav: Navigator<'t>,
    root_name: &str,
) -> Option<(CaptureTree, Navigator<'t>)> {
    let mut tree = CaptureTree::new(root_name);
    let root = tree.root();
    let out = matcher.apply(nav, &mut tree, root)?;
    let span = nav.capture()..out.capture();
    tree.seal(root, span);
    Some((tree, out))
}
