use std::fmt::Debug;

use crate::prelude::*;

/// Identifies a node in a [`DiscriminationTree`]. Indices are stable: once
/// handed out, an id keeps addressing the same slot forever, even though a
/// [`DiscriminationTree::split`] may turn the leaf it pointed at into an inner
/// node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Clone)]
enum NodeKind<S: Symbol, D> {
    Leaf {
        state: Option<D>,
    },
    Inner {
        discriminator: Vec<S>,
        children: [NodeId; 2],
    },
}

#[derive(Clone)]
struct Node<S: Symbol, D> {
    parent: Option<NodeId>,
    kind: NodeKind<S, D>,
}

/// Result of splitting a leaf: the slot of the former leaf, rewritten in place
/// into an inner node, and the two fresh leaves hanging below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// the node that used to be the split leaf and now carries the discriminator
    pub inner: NodeId,
    /// fresh leaf holding whatever payload the split leaf had
    pub old_leaf: NodeId,
    /// fresh leaf holding the newly inserted payload
    pub new_leaf: NodeId,
}

/// The lowest common ancestor of two leaves, together with the label of the
/// child through which each of the two paths continues below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcaInfo {
    /// the lowest common ancestor itself, always an inner node
    pub node: NodeId,
    /// label of the child through which the first leaf is reached
    pub label_a: bool,
    /// label of the child through which the second leaf is reached
    pub label_b: bool,
}

/// A binary tree classifying states of type `D` by their answers to
/// discriminator words. Leaves hold at most one state, inner nodes hold a
/// discriminator and one child per boolean outcome. All nodes live in a single
/// arena, the tree only ever grows by splitting a leaf in two, and the root
/// keeps index zero throughout.
#[derive(Clone)]
pub struct DiscriminationTree<S: Symbol, D> {
    nodes: Vec<Node<S, D>>,
}

impl<S: Symbol, D> Default for DiscriminationTree<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, D> DiscriminationTree<S, D> {
    /// Creates a tree consisting of a single empty leaf, the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Leaf { state: None },
            }],
        }
    }

    /// The root of the tree.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves. Since the tree grows only by splits, this is fully
    /// determined by the node count.
    pub fn num_leaves(&self) -> usize {
        self.nodes.len() / 2 + 1
    }

    /// The parent of `node`, or `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Whether `node` currently is a leaf.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Leaf { .. })
    }

    /// The discriminator of `node`, or `None` if it is a leaf.
    pub fn try_discriminator(&self, node: NodeId) -> Option<&[S]> {
        match &self.nodes[node.0].kind {
            NodeKind::Inner { discriminator, .. } => Some(discriminator),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// The discriminator of the inner node `node`. Panics for leaves.
    pub fn discriminator(&self, node: NodeId) -> &[S] {
        self.try_discriminator(node)
            .expect("only inner nodes carry a discriminator")
    }

    /// The child of `node` for classification outcome `label`. Panics for
    /// leaves.
    pub fn child(&self, node: NodeId, label: bool) -> NodeId {
        match &self.nodes[node.0].kind {
            NodeKind::Inner { children, .. } => children[label as usize],
            NodeKind::Leaf { .. } => panic!("leaves have no children"),
        }
    }

    /// The state sitting in the leaf `node`, if any. Panics for inner nodes.
    pub fn state(&self, node: NodeId) -> Option<&D> {
        match &self.nodes[node.0].kind {
            NodeKind::Leaf { state } => state.as_ref(),
            NodeKind::Inner { .. } => panic!("inner nodes store no state"),
        }
    }

    /// Places `state` in the empty leaf `node`. Panics if the leaf is occupied
    /// or `node` is no leaf.
    pub fn set_state(&mut self, node: NodeId, state: D) {
        match &mut self.nodes[node.0].kind {
            NodeKind::Leaf { state: slot } => {
                assert!(slot.is_none(), "leaf {node:?} is already occupied");
                *slot = Some(state);
            }
            NodeKind::Inner { .. } => panic!("inner nodes store no state"),
        }
    }

    /// The ancestors of `node`, from its parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut ancestors = vec![];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// The path from the root down to `node`, both included.
    pub fn path_from_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = self.ancestors(node);
        path.reverse();
        path.push(node);
        path
    }

    /// Walks the tree from `start`, evaluating each discriminator with
    /// `classify` and descending into the child labelled with the outcome,
    /// until a leaf is reached. Starting on a leaf returns it unchanged.
    pub fn sift<F>(&self, start: NodeId, mut classify: F) -> NodeId
    where
        F: FnMut(&[S]) -> bool,
    {
        let mut current = start;
        loop {
            match &self.nodes[current.0].kind {
                NodeKind::Leaf { .. } => return current,
                NodeKind::Inner {
                    discriminator,
                    children,
                } => {
                    current = children[classify(discriminator) as usize];
                }
            }
        }
    }

    /// Splits the leaf `leaf`: its slot is rewritten in place into an inner
    /// node carrying `discriminator`, the payload it held moves into a fresh
    /// leaf attached under `label_old`, and `new_state` goes into a second
    /// fresh leaf under `label_new`. Ids pointing at `leaf` stay valid and now
    /// address the inner node.
    pub fn split(
        &mut self,
        leaf: NodeId,
        discriminator: Vec<S>,
        label_old: bool,
        label_new: bool,
        new_state: Option<D>,
    ) -> Split {
        assert_ne!(label_old, label_new, "split labels must differ");
        let old_state = match &mut self.nodes[leaf.0].kind {
            NodeKind::Leaf { state } => state.take(),
            NodeKind::Inner { .. } => panic!("can only split leaves"),
        };

        let old_leaf = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(leaf),
            kind: NodeKind::Leaf { state: old_state },
        });
        let new_leaf = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(leaf),
            kind: NodeKind::Leaf { state: new_state },
        });

        let mut children = [old_leaf; 2];
        children[label_new as usize] = new_leaf;
        self.nodes[leaf.0].kind = NodeKind::Inner {
            discriminator,
            children,
        };
        Split {
            inner: leaf,
            old_leaf,
            new_leaf,
        }
    }

    /// Computes the lowest common ancestor of the distinct leaves `a` and `b`,
    /// along with the labels of the children through which each of the two is
    /// reached from it.
    pub fn lca(&self, a: NodeId, b: NodeId) -> LcaInfo {
        assert_ne!(a, b, "lowest common ancestor needs two distinct leaves");
        assert!(
            self.is_leaf(a) && self.is_leaf(b),
            "lowest common ancestors are computed between leaves"
        );
        let mut chain_a = vec![a];
        chain_a.extend(self.ancestors(a));
        let mut below_b = b;
        while let Some(parent) = self.parent(below_b) {
            if let Some(position) = chain_a.iter().position(|node| *node == parent) {
                let below_a = chain_a[position - 1];
                return LcaInfo {
                    node: parent,
                    label_a: self.child(parent, true) == below_a,
                    label_b: self.child(parent, true) == below_b,
                };
            }
            below_b = parent;
        }
        unreachable!("two nodes of the same tree always share an ancestor")
    }
}

impl<S: Symbol, D: Show> Debug for DiscriminationTree<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_node<S: Symbol, D: Show>(
            tree: &DiscriminationTree<S, D>,
            node: NodeId,
            f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result {
            match &tree.nodes[node.0].kind {
                NodeKind::Leaf { state: None } => write!(f, "[]"),
                NodeKind::Leaf { state: Some(state) } => write!(f, "[{}]", state.show()),
                NodeKind::Inner {
                    discriminator,
                    children,
                } => {
                    write!(f, "({} ", discriminator.as_slice().show())?;
                    fmt_node(tree, children[0], f)?;
                    write!(f, " ")?;
                    fmt_node(tree, children[1], f)?;
                    write!(f, ")")
                }
            }
        }
        fmt_node(self, self.root(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sift_walks_to_the_labelled_leaf() {
        let mut tree: DiscriminationTree<char, usize> = DiscriminationTree::new();
        let root = tree.root();
        assert!(tree.is_leaf(root));
        assert_eq!(tree.sift(root, |_| true), root);

        tree.set_state(root, 0);
        let split = tree.split(root, vec![], false, true, Some(1));
        assert_eq!(split.inner, root);
        assert_eq!(tree.state(split.old_leaf), Some(&0));
        assert_eq!(tree.state(split.new_leaf), Some(&1));
        assert_eq!(tree.sift(root, |d| !d.is_empty()), split.old_leaf);
        assert_eq!(tree.sift(root, |d| d.is_empty()), split.new_leaf);
    }

    #[test]
    fn splits_keep_ids_stable() {
        let mut tree: DiscriminationTree<char, usize> = DiscriminationTree::new();
        tree.set_state(tree.root(), 0);
        let first = tree.split(tree.root(), vec![], false, true, Some(1));
        let second = tree.split(first.old_leaf, vec!['a'], true, false, Some(2));

        assert_eq!(second.inner, first.old_leaf);
        assert!(!tree.is_leaf(first.old_leaf));
        assert_eq!(tree.discriminator(first.old_leaf), &['a']);
        assert_eq!(tree.parent(second.old_leaf), Some(first.old_leaf));
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.num_leaves(), 3);
        // the payload moved into the child keyed by the old label
        assert_eq!(tree.state(second.old_leaf), Some(&0));
        assert_eq!(tree.child(first.old_leaf, true), second.old_leaf);
        assert_eq!(format!("{tree:?}"), "(ε (\"a\" [2] [0]) [1])");
    }

    #[test]
    fn lca_reports_the_branching_labels() {
        let mut tree: DiscriminationTree<char, usize> = DiscriminationTree::new();
        tree.set_state(tree.root(), 0);
        let first = tree.split(tree.root(), vec![], false, true, Some(1));
        let second = tree.split(first.old_leaf, vec!['a'], true, false, Some(2));

        let lca = tree.lca(second.new_leaf, first.new_leaf);
        assert_eq!(
            lca,
            LcaInfo {
                node: tree.root(),
                label_a: false,
                label_b: true
            }
        );

        let lca = tree.lca(second.old_leaf, second.new_leaf);
        assert_eq!(
            lca,
            LcaInfo {
                node: second.inner,
                label_a: true,
                label_b: false
            }
        );

        let path = tree.path_from_root(second.old_leaf);
        assert_eq!(path, vec![tree.root(), first.old_leaf, second.old_leaf]);
    }
}
