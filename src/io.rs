//! Reading flat lists and writing forests through serde.
//!
//! File helpers pick the data format from the file extension (`.json`,
//! `.jsonl`, ...). Nested `children` only survive formats that can express
//! them, so forests are best written as JSON.
//!
//! Each tree level nests two JSON containers (the node object and its
//! `children` array), and `serde_json` refuses input nested deeper than 128
//! containers. Writers therefore reject trees taller than [`MAX_LEVELS`],
//! leaving room for nesting inside `extra`, so every written file reads back.

use std::{hash::Hash, path::Path};

use serde::{Serialize, de::DeserializeOwned};
use serdeio::{read_record_from_file, write_record_to_file};
use tracing::{debug, instrument};

use crate::{
    error::{TreeError, TreeResult},
    forest::Forest,
    node::TreeNode,
};

/// Tallest tree, in levels, the writers accept.
pub const MAX_LEVELS: usize = 48;

fn check_levels<K, E>(roots: &[TreeNode<K, E>]) -> TreeResult<(), K> {
    let levels = roots.iter().map(TreeNode::height).max().unwrap_or(0);
    if levels > MAX_LEVELS {
        return Err(TreeError::TooDeep {
            levels,
            limit: MAX_LEVELS,
        });
    }
    Ok(())
}

#[instrument(level = "debug", skip_all)]
pub fn read_list_from_file<K, E>(path: impl AsRef<Path>) -> TreeResult<Vec<TreeNode<K, E>>, K>
where
    TreeNode<K, E>: DeserializeOwned,
{
    let list: Vec<TreeNode<K, E>> = read_record_from_file(path)?;
    debug!(records = list.len(), "read flat list");
    Ok(list)
}

pub fn read_forest_from_file<K, E>(
    path: impl AsRef<Path>,
    root_parent_id: &K,
) -> TreeResult<Forest<K, E>, K>
where
    K: Eq + Hash + Clone,
    TreeNode<K, E>: DeserializeOwned,
{
    let list = read_list_from_file(path)?;
    Forest::from_list(list, root_parent_id)
}

pub fn write_list_to_file<K, E>(
    path: impl AsRef<Path>,
    list: &[TreeNode<K, E>],
) -> TreeResult<(), K>
where
    TreeNode<K, E>: Serialize,
{
    check_levels(list)?;
    write_record_to_file(path, &list)?;
    Ok(())
}

pub fn write_forest_to_file<K, E>(
    path: impl AsRef<Path>,
    forest: &Forest<K, E>,
) -> TreeResult<(), K>
where
    Forest<K, E>: Serialize,
{
    check_levels(forest.roots())?;
    write_record_to_file(path, forest)?;
    Ok(())
}

pub fn list_from_json<K, E>(json: &str) -> TreeResult<Vec<TreeNode<K, E>>, K>
where
    TreeNode<K, E>: DeserializeOwned,
{
    Ok(serde_json::from_str(json)?)
}

pub fn forest_to_json<K, E>(forest: &Forest<K, E>) -> TreeResult<String, K>
where
    Forest<K, E>: Serialize,
{
    check_levels(forest.roots())?;
    Ok(serde_json::to_string_pretty(forest)?)
}
