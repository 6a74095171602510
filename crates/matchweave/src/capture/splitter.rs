//! # Capture Splitter
//!
//! Splits text into `:fragment` capture spans, scanning code point by
//! code point. Whenever the delimiter matcher fires at the cursor the
//! current fragment closes and the next opens; an optional end matcher,
//! firing at the cursor, closes the final fragment and halts the scan.
//! Unterminated input still emits its trailing in-progress fragment.

use crate::capture::tree::{CaptureTree, FRAGMENT_NAME, NodeId};
use crate::capture::CaptureMatcher;
use crate::matchers::Matcher;
use crate::navigator::Navigator;
use crate::text::Utf16Text;

/// Splits text into `:fragment` groups on a delimiter matcher.
pub struct CaptureSplit {
    name: String,
    delimiter: Box<dyn Matcher>,
    end: Option<Box<dyn Matcher>>,
}

impl CaptureSplit {
    /// Split on `delimiter` under a `name`d branch.
    pub fn new(
        name: &str,
        delimiter: Box<dyn Matcher>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            delimiter,
            end: None,
        }
    }

    /// Halt the scan when `end` matches at the cursor.
    pub fn with_end(
        mut self,
        end: Box<dyn Matcher>,
    ) -> Self {
        self.end = Some(end);
        self
    }

    /// Split a whole text into fragment strings.
    ///
    /// Convenience over [`CaptureMatcher::apply`]; one string per
    /// `:fragment` span, in order.
    pub fn split_strings(
        &self,
        text: &Utf16Text,
    ) -> Vec<String> {
        let mut tree = CaptureTree::new("");
        let root = tree.root();
        // The splitter cannot fail.
        let _ = self.apply(Navigator::new(text), &mut tree, root);
        // The split node is always attached: its fragments make it a
        // branch even when anonymous.
        let node = tree.node(root).children()[0];
        tree.children_named(node, FRAGMENT_NAME)
            .into_iter()
            .filter_map(|id| text.decode_range(tree.node(id).span()))
            .collect()
    }

    fn seal_fragment(
        tree: &mut CaptureTree,
        node: NodeId,
        start: usize,
        end: usize,
    ) {
        let fragment = tree.create(FRAGMENT_NAME);
        tree.seal(fragment, start..end);
        tree.add_child(node, fragment);
    }
}

impl CaptureMatcher for CaptureSplit {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
        tree: &mut CaptureTree,
        parent: NodeId,
    ) -> Option<Navigator<'t>> {
        nav.assert_settled();
        let node = tree.create(&self.name);

        let mut cur = nav;
        let mut frag_start = cur.capture();
        let mut halted = false;

        while !halted {
            if let Some(end) = &self.end
                && let Some(next) = end.apply(cur)
            {
                // The end match closes the final fragment; its own span
                // belongs to no fragment.
                Self::seal_fragment(tree, node, frag_start, cur.capture());
                cur = next;
                halted = true;
                break;
            }

            match self.delimiter.apply(cur) {
                // A zero-width delimiter would never advance the scan;
                // treat it as not firing.
                Some(next) if next.capture() > cur.capture() => {
                    Self::seal_fragment(tree, node, frag_start, cur.capture());
                    frag_start = next.capture();
                    cur = next;
                }
                _ => {
                    if cur.at_end() {
                        break;
                    }
                    cur.advance_capture_code_point();
                }
            }
        }

        if !halted {
            // Trailing in-progress fragment.
            Self::seal_fragment(tree, node, frag_start, cur.capture());
        }

        log::trace!(
            "split {:?}: {} fragments over {} units",
            self.name,
            tree.node(node).children().len(),
            cur.capture() - nav.capture(),
        );

        tree.seal(node, nav.capture()..cur.capture());
        tree.add_child(parent, node);
        Some(cur)
    }
}
