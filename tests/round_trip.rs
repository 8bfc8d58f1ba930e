use std::collections::HashMap;

use treelist::{Forest, TreeError, TreeNode, list_to_tree, tree_to_list};

type Node = TreeNode<u32, String>;

/// Hierarchy of 60 records under three roots, rotated so some children
/// come before their parents.
fn sample_list() -> Vec<Node> {
    let mut list = Vec::new();
    for id in 1..=60u32 {
        let parent_id = if id <= 3 { 0 } else { (id * 7) % (id - 1) + 1 };
        let node = TreeNode::new(id, parent_id, format!("n{id}"), format!("x{id}"));
        list.push(node.with_sort(id as i64));
    }
    list.rotate_left(17);
    list
}

fn key(node: &Node) -> (u32, u32, String, i64, String) {
    (
        node.id,
        node.parent_id,
        node.name.clone(),
        node.sort,
        node.extra.clone(),
    )
}

#[test]
fn given_consistent_list_when_round_tripped_then_records_are_preserved() {
    let list = sample_list();
    let mut expected: Vec<_> = list.iter().map(key).collect();
    expected.sort();

    let roots = list_to_tree(list, &0).unwrap();
    let flat = tree_to_list(&roots);

    let mut actual: Vec<_> = flat.iter().map(key).collect();
    actual.sort();
    assert_eq!(actual, expected);
    assert!(flat.iter().all(TreeNode::is_leaf));
}

#[test]
fn given_flattened_forest_when_rebuilt_then_forest_is_identical() {
    let roots = list_to_tree(sample_list(), &0).unwrap();

    let rebuilt = list_to_tree(tree_to_list(&roots), &0).unwrap();

    assert_eq!(rebuilt, roots);
}

#[test]
fn given_forest_when_flattened_then_every_node_precedes_its_descendants() {
    let roots = list_to_tree(sample_list(), &0).unwrap();
    let flat = tree_to_list(&roots);

    let position: HashMap<u32, usize> = flat
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id, i))
        .collect();
    for node in &flat {
        if node.parent_id != 0 {
            assert!(position[&node.parent_id] < position[&node.id]);
        }
    }
}

#[test]
fn given_forest_when_built_then_depth_counts_ancestors() {
    let list = sample_list();
    let parent_of: HashMap<u32, u32> = list.iter().map(|n| (n.id, n.parent_id)).collect();

    let forest = Forest::from_list(list, &0).unwrap();

    for node in &forest {
        let mut ancestors = 0;
        let mut current = node.parent_id;
        while current != 0 {
            ancestors += 1;
            current = parent_of[&current];
        }
        assert_eq!(node.deep, ancestors, "node {}", node.id);
    }
}

#[test]
fn given_forest_when_built_then_siblings_follow_input_order() {
    let list = sample_list();
    let input_position: HashMap<u32, usize> =
        list.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

    let forest = Forest::from_list(list, &0).unwrap();

    let root_positions: Vec<usize> = forest.roots().iter().map(|n| input_position[&n.id]).collect();
    assert!(root_positions.is_sorted());
    for node in &forest {
        let positions: Vec<usize> = node.children.iter().map(|c| input_position[&c.id]).collect();
        assert!(positions.is_sorted(), "children of {}", node.id);
    }
}

#[test]
fn given_concrete_example_when_converted_then_matches_expected_shape() {
    let list = vec![
        TreeNode::new(1, 0, "A", String::new()),
        TreeNode::new(2, 1, "B", String::new()),
        TreeNode::new(3, 1, "C", String::new()),
    ];

    let forest = Forest::from_list(list, &0).unwrap();

    assert_eq!(forest.roots().len(), 1);
    let root = &forest.roots()[0];
    assert_eq!((root.id, root.deep), (1, 0));
    let children: Vec<(u32, usize)> = root.children.iter().map(|c| (c.id, c.deep)).collect();
    assert_eq!(children, vec![(2, 1), (3, 1)]);

    let flat = forest.to_list();
    let ids: Vec<u32> = flat.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(flat.iter().all(|n| n.children.is_empty()));
    assert_eq!(forest.into_list(), flat);
}

#[test]
fn given_missing_parent_when_building_then_no_forest_is_returned() {
    let list = vec![
        TreeNode::new(1, 0, "A", String::new()),
        TreeNode::new(2, 99, "B", String::new()),
        TreeNode::new(3, 1, "C", String::new()),
    ];

    let result = Forest::from_list(list, &0);

    assert!(matches!(
        result,
        Err(TreeError::ParentNotFound { id: 2, parent_id: 99 })
    ));
}
