use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Position of every record in the input list, keyed by its id.
pub(crate) type IdIndex<'a, K> = FxIndexMap<&'a K, usize>;
