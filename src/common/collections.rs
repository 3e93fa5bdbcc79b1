pub use std::collections::{BTreeMap, BTreeSet, VecDeque, btree_map, hash_map};

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
