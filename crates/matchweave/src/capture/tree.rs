//! # Capture Tree
//!
//! An arena-backed tree of named capture spans. Nodes are created
//! unsealed (empty span, children growable), populated, and finalized by
//! one `seal` call; sealing is one-way. Mutating a sealed node is a
//! protocol violation and panics.
//!
//! Capture matchers that may fail take a [`CaptureTree::mark`] before
//! the attempt and [`CaptureTree::rollback`] on failure, the arena
//! analogue of copying a navigator before a risky branch.

use core::ops::Range;

/// The name of anonymous nodes.
pub const ANONYMOUS_NAME: &str = "";

/// The group name of splitter fragments.
pub const FRAGMENT_NAME: &str = ":fragment";

/// A handle to a node in a [`CaptureTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node: a name, a matched span, and child links.
#[derive(Clone, Debug)]
pub struct CaptureNode {
    name: String,
    span: Range<usize>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    sealed: bool,
}

impl CaptureNode {
    /// The group name; empty for anonymous nodes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The matched span, in UTF-16 units; empty until sealed.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The child node ids, in match order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The parent node id; `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Has this node been sealed?
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Is this node anonymous?
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Is this node childless?
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The arena of capture nodes for one match.
#[derive(Clone, Debug)]
pub struct CaptureTree {
    nodes: Vec<CaptureNode>,
    root: NodeId,
}

impl CaptureTree {
    /// A new tree with one unsealed root node.
    ///
    /// The root is treated as named for folding and pruning purposes
    /// even when its name is empty.
    pub fn new(root_name: &str) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.create(root_name);
        tree
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node behind an id.
    pub fn node(
        &self,
        id: NodeId,
    ) -> &CaptureNode {
        &self.nodes[id.0]
    }

    /// Create a new detached, unsealed node.
    pub fn create(
        &mut self,
        name: &str,
    ) -> NodeId {
        self.nodes.push(CaptureNode {
            name: name.to_owned(),
            span: 0..0,
            children: Vec::new(),
            parent: None,
            sealed: false,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Seal a node with its matched span. One-way; sealing twice panics.
    pub fn seal(
        &mut self,
        id: NodeId,
        span: Range<usize>,
    ) {
        let node = &mut self.nodes[id.0];
        assert!(!node.sealed, "capture node sealed twice");
        node.span = span;
        node.sealed = true;
    }

    /// Attach a sealed child to an unsealed parent, applying the
    /// anonymous-folding rule: an anonymous leaf is discarded; an
    /// anonymous branch attaches as a single child.
    ///
    /// Panics when the parent is sealed or the child is not.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) {
        assert!(
            !self.nodes[parent.0].sealed,
            "cannot add a child to a sealed capture node"
        );
        assert!(
            self.nodes[child.0].sealed,
            "cannot attach an unsealed capture node"
        );
        if self.nodes[child.0].is_anonymous() && self.nodes[child.0].is_leaf() {
            // Folded away.
            return;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// The number of live arena slots; pair with [`Self::rollback`].
    pub fn mark(&self) -> usize {
        self.nodes.len()
    }

    /// Discard all nodes created since `mark`.
    ///
    /// Callers only roll back attempts whose nodes were never attached
    /// below the mark, so no live links are severed.
    pub fn rollback(
        &mut self,
        mark: usize,
    ) {
        self.nodes.truncate(mark);
    }

    /// The nearest ancestor with a non-empty name, or the root.
    pub fn first_named_ancestor(
        &self,
        id: NodeId,
    ) -> NodeId {
        let mut cur = id;
        while let Some(parent) = self.nodes[cur.0].parent {
            cur = parent;
            if cur == self.root || !self.nodes[cur.0].is_anonymous() {
                break;
            }
        }
        cur
    }

    /// Collapse all anonymous branches below `id`, re-parenting named
    /// descendants onto the nearest named ancestor.
    ///
    /// Panics on an anonymous leaf: folding on attach should already
    /// have discarded those.
    pub fn prune(
        &mut self,
        id: NodeId,
    ) {
        let mut kept: Vec<NodeId> = Vec::new();
        self.collect_pruned(id, &mut kept);
        for &child in &kept {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes[id.0].children = kept;
    }

    fn collect_pruned(
        &mut self,
        id: NodeId,
        kept: &mut Vec<NodeId>,
    ) {
        for child in self.nodes[id.0].children.clone() {
            if self.nodes[child.0].is_anonymous() {
                assert!(
                    !self.nodes[child.0].is_leaf(),
                    "anonymous leaf encountered during pruning"
                );
                // Splice the branch's descendants into the named ancestor.
                self.collect_pruned(child, kept);
            } else {
                self.prune(child);
                kept.push(child);
            }
        }
    }

    /// All ids under `id` (excluding `id`), depth-first.
    pub fn descendants(
        &self,
        id: NodeId,
    ) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.nodes[cur.0].children.iter().rev().copied());
        }
        out
    }

    /// The child ids of `id` with the given name.
    pub fn children_named(
        &self,
        id: NodeId,
        name: &str,
    ) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes[c.0].name == name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_protocol() {
        let mut tree = CaptureTree::new("root");
        let leaf = tree.create("digits");
        assert!(!tree.node(leaf).is_sealed());

        tree.seal(leaf, 0..3);
        tree.add_child(tree.root(), leaf);

        assert_eq!(tree.node(leaf).span(), 0..3);
        assert_eq!(tree.node(leaf).parent(), Some(tree.root()));
        assert_eq!(tree.node(tree.root()).children(), &[leaf]);
    }

    #[test]
    #[should_panic(expected = "sealed twice")]
    fn test_double_seal_panics() {
        let mut tree = CaptureTree::new("root");
        let leaf = tree.create("x");
        tree.seal(leaf, 0..1);
        tree.seal(leaf, 0..2);
    }

    #[test]
    #[should_panic(expected = "sealed capture node")]
    fn test_add_child_after_seal_panics() {
        let mut tree = CaptureTree::new("root");
        let branch = tree.create("b");
        let leaf = tree.create("x");
        tree.seal(branch, 0..1);
        tree.seal(leaf, 0..1);
        tree.add_child(branch, leaf);
    }

    #[test]
    fn test_anonymous_leaf_folds_away() {
        let mut tree = CaptureTree::new("root");
        let leaf = tree.create(ANONYMOUS_NAME);
        tree.seal(leaf, 0..2);
        tree.add_child(tree.root(), leaf);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_anonymous_branch_attaches_whole() {
        let mut tree = CaptureTree::new("root");
        let branch = tree.create(ANONYMOUS_NAME);
        let named = tree.create("inner");
        tree.seal(named, 0..1);
        tree.add_child(branch, named);
        tree.seal(branch, 0..2);
        tree.add_child(tree.root(), branch);

        // Attached as a single child; its children are not promoted.
        assert_eq!(tree.node(tree.root()).children(), &[branch]);
        assert_eq!(tree.node(branch).children(), &[named]);
    }

    #[test]
    fn test_first_named_ancestor() {
        let mut tree = CaptureTree::new("root");
        let anon = tree.create(ANONYMOUS_NAME);
        let named = tree.create("named");
        let inner_anon = tree.create(ANONYMOUS_NAME);
        let deep = tree.create("deep");

        tree.seal(deep, 0..1);
        tree.add_child(inner_anon, deep);
        tree.seal(inner_anon, 0..1);
        tree.add_child(named, inner_anon);
        tree.seal(named, 0..1);
        tree.add_child(anon, named);
        tree.seal(anon, 0..1);
        tree.add_child(tree.root(), anon);

        assert_eq!(tree.first_named_ancestor(deep), named);
        assert_eq!(tree.first_named_ancestor(inner_anon), named);
        // The root counts as named even when anonymous.
        assert_eq!(tree.first_named_ancestor(named), tree.root());
        assert_eq!(tree.first_named_ancestor(anon), tree.root());
    }

    #[test]
    fn test_prune_collapses_anonymous_branches() {
        let mut tree = CaptureTree::new("root");
        let anon = tree.create(ANONYMOUS_NAME);
        let a = tree.create("a");
        let b = tree.create("b");

        tree.seal(a, 0..1);
        tree.add_child(anon, a);
        tree.seal(b, 1..2);
        tree.add_child(anon, b);
        tree.seal(anon, 0..2);
        tree.add_child(tree.root(), anon);

        tree.prune(tree.root());

        assert_eq!(tree.node(tree.root()).children(), &[a, b]);
        assert_eq!(tree.node(a).parent(), Some(tree.root()));
        assert_eq!(tree.node(b).parent(), Some(tree.root()));
        for id in tree.descendants(tree.root()) {
            assert!(!tree.node(id).is_anonymous());
        }
    }

    #[test]
    fn test_rollback() {
        let mut tree = CaptureTree::new("root");
        let keep = tree.create("keep");
        tree.seal(keep, 0..1);
        tree.add_child(tree.root(), keep);

        let mark = tree.mark();
        let _scratch = tree.create("scratch");
        tree.rollback(mark);

        assert_eq!(tree.mark(), mark);
        assert_eq!(tree.node(tree.root()).children(), &[keep]);
    }
}
