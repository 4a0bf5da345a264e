//! Device registry
//!
//! Live inventory of every device seen since boot, keyed by identity and
//! ordered by key. Nothing on screen reads it back; it exists for logging
//! and for future views.
//!
//! The registry never evicts. On a device that is power-cycled periodically
//! this is bounded by the number of distinct devices in range.

use alloc::collections::btree_map::{self, BTreeMap};

use super::identity::{Identity, Rssi};

/// Identity → last observed signal strength
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<Identity, Rssi>,
}

impl Registry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the entry for `identity`
    pub fn record_sighting(&mut self, identity: &Identity, rssi: Rssi) {
        match self.entries.get_mut(identity) {
            Some(last) => *last = rssi,
            None => {
                self.entries.insert(identity.clone(), rssi);
            }
        }
    }

    /// Last signal strength recorded for `identity`
    pub fn get(&self, identity: &Identity) -> Option<Rssi> {
        self.entries.get(identity).copied()
    }

    /// Number of distinct devices seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been seen yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Key-ordered iterator over registry entries
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Identity, Rssi>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Identity, Rssi);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, rssi)| (id, *rssi))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
