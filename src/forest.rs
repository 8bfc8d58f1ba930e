use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    error::{TreeError, TreeResult},
    map::IdIndex,
    node::TreeNode,
    tree::PreOrder,
};

/// Builds a forest out of a flat list of parent-pointer records.
///
/// The list is consumed: every record becomes a node of the returned forest.
/// A record is a root when its `parent_id` equals `root_parent_id` or its own
/// `id`. Roots and siblings keep the relative order they had in `list`, and
/// `deep` is recomputed from the resulting structure.
///
/// Fails on the first non-root record whose parent is absent from `list`.
/// When ids repeat, children attach to the last record carrying that id.
#[instrument(level = "debug", skip_all, fields(records = list.len()))]
pub fn list_to_tree<K, E>(
    list: Vec<TreeNode<K, E>>,
    root_parent_id: &K,
) -> TreeResult<Vec<TreeNode<K, E>>, K>
where
    K: Eq + Hash + Clone,
{
    let links = Links::resolve(&list, root_parent_id)?;
    Ok(links.assemble(list))
}

/// Parent/child relations between list positions.
struct Links {
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl Links {
    fn resolve<K, E>(list: &[TreeNode<K, E>], root_parent_id: &K) -> TreeResult<Self, K>
    where
        K: Eq + Hash + Clone,
    {
        let mut index = IdIndex::default();
        index.reserve(list.len());
        for (position, node) in list.iter().enumerate() {
            if index.insert(&node.id, position).is_some() {
                debug!(position, "duplicate id, lookup now points at the later record");
            }
        }

        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); list.len()];
        for (position, node) in list.iter().enumerate() {
            if node.is_root(root_parent_id) {
                roots.push(position);
                continue;
            }
            let Some(&parent) = index.get(&node.parent_id) else {
                return Err(TreeError::ParentNotFound {
                    id: node.id.clone(),
                    parent_id: node.parent_id.clone(),
                });
            };
            children[parent].push(position);
        }

        Ok(Self { roots, children })
    }

    fn assemble<K, E>(self, list: Vec<TreeNode<K, E>>) -> Vec<TreeNode<K, E>> {
        let Self { roots, children } = self;
        let total = list.len();
        let mut slots: Vec<Option<TreeNode<K, E>>> = list
            .into_iter()
            .map(|mut node| {
                node.children.clear();
                Some(node)
            })
            .collect();

        // pre-order walk over positions, assigning depth on the way down
        let mut order = Vec::with_capacity(total);
        let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&root| (root, 0)).collect();
        while let Some((position, deep)) = stack.pop() {
            if let Some(node) = slots[position].as_mut() {
                node.deep = deep;
            }
            order.push(position);
            stack.extend(children[position].iter().rev().map(|&child| (child, deep + 1)));
        }

        // reverse pre-order finishes every subtree before its parent is visited
        for &position in order.iter().rev() {
            let owned: Vec<TreeNode<K, E>> = children[position]
                .iter()
                .filter_map(|&child| slots[child].take())
                .collect();
            if let Some(node) = slots[position].as_mut() {
                node.children = owned;
            }
        }

        let unreachable = total - order.len();
        if unreachable > 0 {
            warn!(unreachable, "records caught in a parent cycle were dropped");
        }

        roots
            .iter()
            .filter_map(|&root| slots[root].take())
            .collect()
    }
}

/// Ordered collection of trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest<K, E> {
    roots: Vec<TreeNode<K, E>>,
}

impl<K, E> Default for Forest<K, E> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<K, E> Forest<K, E> {
    pub fn new(roots: Vec<TreeNode<K, E>>) -> Self {
        Self { roots }
    }

    pub fn from_list(list: Vec<TreeNode<K, E>>, root_parent_id: &K) -> TreeResult<Self, K>
    where
        K: Eq + Hash + Clone,
    {
        list_to_tree(list, root_parent_id).map(Self::new)
    }

    pub fn roots(&self) -> &[TreeNode<K, E>] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<TreeNode<K, E>> {
        self.roots
    }

    /// Total number of nodes across all trees.
    pub fn len(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_len).sum()
    }

    /// Number of levels of the deepest tree; 0 for an empty forest.
    pub fn height(&self) -> usize {
        self.roots.iter().map(TreeNode::height).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> PreOrder<'_, K, E> {
        PreOrder::new(&self.roots)
    }

    /// Flattens the forest in pre-order, moving nodes instead of copying them.
    pub fn into_list(self) -> Vec<TreeNode<K, E>> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack: Vec<TreeNode<K, E>> = self.roots.into_iter().rev().collect();
        while let Some(mut node) = stack.pop() {
            let children = std::mem::take(&mut node.children);
            result.push(node);
            stack.extend(children.into_iter().rev());
        }
        result
    }
}

impl<K: Clone, E: Clone> Forest<K, E> {
    pub fn to_list(&self) -> Vec<TreeNode<K, E>> {
        crate::tree::tree_to_list(&self.roots)
    }
}

impl<'a, K, E> IntoIterator for &'a Forest<K, E> {
    type Item = &'a TreeNode<K, E>;
    type IntoIter = PreOrder<'a, K, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
