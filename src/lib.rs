//! Conversion between flat parent-pointer lists and owned trees.

mod error;
mod forest;
mod map;
mod node;
mod tree;

pub mod io;

pub use error::{TreeError, TreeResult};
pub use forest::{Forest, list_to_tree};
pub use node::TreeNode;
pub use tree::{PreOrder, tree_to_list};
