#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

/// Pivots that already triggered a window recompute on a cache instance.
#[cfg(feature = "std")]
pub(crate) type PivotSet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type PivotSet<K> = BTreeSet<K>;

/// Cell sizes measured during one grid recompute, so each cell is measured once.
#[cfg(feature = "std")]
pub(crate) type CellMemo<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type CellMemo<K, V> = BTreeMap<K, V>;
