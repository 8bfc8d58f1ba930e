use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::PreOrder;

/// A node of a parent-pointer hierarchy.
///
/// The same type is used on both sides of the conversion: as a flat record
/// (where `children` is empty) and as a tree node owning its subtree.
///
/// When deserializing, `name`, `sort`, `deep` and `children` may be absent.
/// `extra` is required unless `E` is an `Option`, in which case a missing
/// payload reads as `None`.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the tree with an explicit
/// stack. Serialization nests once per level; see [`crate::io::MAX_LEVELS`].
#[derive(Serialize, Deserialize)]
pub struct TreeNode<K, E> {
    pub id: K,
    pub parent_id: K,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    /// Depth below the root, recomputed by [`crate::list_to_tree`].
    #[serde(default)]
    pub deep: usize,
    pub extra: E,
    #[serde(default = "Vec::new")]
    pub children: Vec<TreeNode<K, E>>,
}

impl<K, E> TreeNode<K, E> {
    pub fn new(id: K, parent_id: K, name: impl Into<String>, extra: E) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            sort: 0,
            deep: 0,
            extra,
            children: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels in the subtree rooted here; 1 for a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        height
    }

    /// Number of nodes in the subtree rooted here, including `self`.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Unlinks descendants iteratively; the derived drop would recurse once per level.
impl<K, E> Drop for TreeNode<K, E> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<K: PartialEq, E> TreeNode<K, E> {
    /// A node pointing at the sentinel or at itself starts a new tree.
    pub fn is_root(&self, root_parent_id: &K) -> bool {
        self.parent_id == *root_parent_id || self.parent_id == self.id
    }
}

impl<K: Clone, E: Clone> TreeNode<K, E> {
    /// Copy of this node without its children.
    pub fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            name: self.name.clone(),
            sort: self.sort,
            deep: self.deep,
            extra: self.extra.clone(),
            children: Vec::new(),
        }
    }
}

impl<K: Clone, E: Clone> Clone for TreeNode<K, E> {
    fn clone(&self) -> Self {
        // reverse pre-order: every subtree is copied before its parent
        let descendants: Vec<&Self> = PreOrder::new(&self.children).collect();
        let mut built: Vec<Self> = Vec::with_capacity(descendants.len());
        for node in descendants.into_iter().rev() {
            let mut copy = node.detached();
            copy.children = take_built(&mut built, node.children.len());
            built.push(copy);
        }
        let mut copy = self.detached();
        copy.children = take_built(&mut built, self.children.len());
        copy
    }
}

/// Pops the last `count` finished subtrees, restoring sibling order.
fn take_built<K, E>(built: &mut Vec<TreeNode<K, E>>, count: usize) -> Vec<TreeNode<K, E>> {
    let mut children = built.split_off(built.len().saturating_sub(count));
    children.reverse();
    children
}

impl<K: PartialEq, E: PartialEq> TreeNode<K, E> {
    fn same_fields(&self, other: &Self) -> bool {
        self.id == other.id
            && self.parent_id == other.parent_id
            && self.name == other.name
            && self.sort == other.sort
            && self.deep == other.deep
            && self.extra == other.extra
            && self.children.len() == other.children.len()
    }
}

impl<K: PartialEq, E: PartialEq> PartialEq for TreeNode<K, E> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((left, right)) = stack.pop() {
            if !left.same_fields(right) {
                return false;
            }
            stack.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl<K: Eq, E: Eq> Eq for TreeNode<K, E> {}

/// Fields of one node, without its children.
struct Fields<'a, K, E>(&'a TreeNode<K, E>);

impl<K: fmt::Debug, E: fmt::Debug> fmt::Debug for Fields<'_, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        f.debug_struct("TreeNode")
            .field("id", &node.id)
            .field("parent_id", &node.parent_id)
            .field("name", &node.name)
            .field("sort", &node.sort)
            .field("deep", &node.deep)
            .field("extra", &node.extra)
            .finish_non_exhaustive()
    }
}

/// Descendants listed flat, in pre-order.
struct Descendants<'a, K, E>(&'a [TreeNode<K, E>]);

impl<K: fmt::Debug, E: fmt::Debug> fmt::Debug for Descendants<'_, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(PreOrder::new(self.0).map(Fields))
            .finish()
    }
}

impl<K: fmt::Debug, E: fmt::Debug> fmt::Debug for TreeNode<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("name", &self.name)
            .field("sort", &self.sort)
            .field("deep", &self.deep)
            .field("extra", &self.extra)
            .field("descendants", &Descendants(&self.children))
            .finish()
    }
}
