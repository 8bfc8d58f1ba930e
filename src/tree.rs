use crate::node::TreeNode;

/// Flattens a forest into a list of detached copies, in pre-order.
///
/// Roots are visited in order and every node is emitted before its
/// descendants. The copies have empty `children`; the forest is left intact.
pub fn tree_to_list<K: Clone, E: Clone>(roots: &[TreeNode<K, E>]) -> Vec<TreeNode<K, E>> {
    PreOrder::new(roots).map(TreeNode::detached).collect()
}

/// Depth-first, pre-order iterator over a forest.
pub struct PreOrder<'a, K, E> {
    stack: Vec<&'a TreeNode<K, E>>,
}

impl<'a, K, E> PreOrder<'a, K, E> {
    pub fn new(roots: &'a [TreeNode<K, E>]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a, K, E> Iterator for PreOrder<'a, K, E> {
    type Item = &'a TreeNode<K, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
