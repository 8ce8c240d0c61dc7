//! Side table from element handles to attached widget state.
//!
//! An element is initialized exactly when it has an entry here. The DOM layer
//! stores the `InstanceId` on the element (as a data attribute) and removes
//! the entry on `destroy`, which drops the widget and its listeners.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Stable handle for an attached element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(InstanceId)
    }
}

/// Owns one value per attached element.
#[derive(Debug)]
pub struct InstanceRegistry<V> {
    next_id: u32,
    entries: HashMap<InstanceId, V>,
}

impl<V> Default for InstanceRegistry<V> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: HashMap::new(),
        }
    }
}

impl<V> InstanceRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a fresh id. Ids are never reused.
    pub fn insert(&mut self, value: V) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, value);
        tracing::debug!(%id, live = self.entries.len(), "registered instance");
        id
    }

    pub fn get(&self, id: InstanceId) -> Option<&V> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut V> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Remove and return the value for `id`.
    pub fn remove(&mut self, id: InstanceId) -> Option<V> {
        let removed = self.entries.remove(&id);
        if removed.is_some() {
            tracing::debug!(%id, live = self.entries.len(), "released instance");
        }
        removed
    }

    /// Drop every entry for which `keep` returns false.
    ///
    /// Used to sweep entries whose element has left the document.
    pub fn retain(&mut self, mut keep: impl FnMut(InstanceId, &V) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, v| keep(*id, v));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
