use rand::Rng;
use slotmap::SecondaryMap;

use crate::domain::particle::ParticleId;

/// Per-frame work queue.
///
/// Drawing a uniformly random slot from what remains yields a uniform random permutation
/// without replacement. Removal is O(1) (swap-remove plus a slot index), so particles that
/// were updated early through recursive resolution can drop out before their turn.
pub(super) struct UpdateQueue {
    items: Vec<ParticleId>,
    slots: SecondaryMap<ParticleId, usize>,
}

impl UpdateQueue {
    pub(super) fn new() -> Self {
        Self {
            items: Vec::new(),
            slots: SecondaryMap::new(),
        }
    }

    pub(super) fn fill(&mut self, ids: &[ParticleId]) {
        self.clear();
        self.items.reserve(ids.len());
        for &id in ids {
            if self.slots.contains_key(id) {
                continue;
            }
            self.slots.insert(id, self.items.len());
            self.items.push(id);
        }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(super) fn contains(&self, id: ParticleId) -> bool {
        self.slots.contains_key(id)
    }

    pub(super) fn pop_random<R: Rng>(&mut self, rng: &mut R) -> Option<ParticleId> {
        if self.items.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.items.len());
        Some(self.take(idx))
    }

    /// Idempotent: removing an id that is not queued is a no-op.
    pub(super) fn remove(&mut self, id: ParticleId) -> bool {
        match self.slots.get(id).copied() {
            Some(idx) => {
                self.take(idx);
                true
            }
            None => false,
        }
    }

    pub(super) fn clear(&mut self) {
        self.items.clear();
        self.slots.clear();
    }

    fn take(&mut self, idx: usize) -> ParticleId {
        let id = self.items.swap_remove(idx);
        self.slots.remove(id);
        if let Some(&moved) = self.items.get(idx) {
            self.slots.insert(moved, idx);
        }
        id
    }
}
