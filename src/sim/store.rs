//! Fixed-capacity entity storage
//!
//! Shots and men live in [`EntityRing`]s. With the default
//! [`OverflowPolicy::Wrap`] a full ring overwrites slot `count % capacity`
//! instead of growing, so the live length never exceeds capacity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Behavior when inserting into a full store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Overwrite slot `count % capacity` (older entity is lost)
    #[default]
    Wrap,
    /// Grow past capacity
    Grow,
}

/// A launched shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A falling man
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    /// Descent speed (units/s, positive is down)
    pub speed: f32,
}

/// Ordered storage with modulo overwrite on overflow.
///
/// `count` is the insertion counter: it keeps climbing past capacity while the
/// ring is full and only drops back to the live length when something is
/// removed. Live length is always `min(count, capacity)` under `Wrap`.
#[derive(Debug, Clone)]
pub struct EntityRing<T> {
    items: Vec<T>,
    capacity: usize,
    count: usize,
    policy: OverflowPolicy,
}

impl<T> EntityRing<T> {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            count: 0,
            policy,
        }
    }

    /// Insert an entity, returning the slot it landed in
    pub fn insert(&mut self, item: T) -> usize {
        let slot = match self.policy {
            OverflowPolicy::Wrap if self.count >= self.capacity => {
                let slot = self.count % self.capacity;
                self.items[slot] = item;
                slot
            }
            _ => {
                self.items.push(item);
                self.items.len() - 1
            }
        };
        self.count += 1;
        slot
    }

    /// Remove the entity at `index`, shifting later entities down by one
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.count = self.items.len();
        Some(item)
    }

    /// Keep only entities matching `keep`, preserving order
    ///
    /// Returns the number removed.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        let removed = before - self.items.len();
        if removed > 0 {
            self.count = self.items.len();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.count = 0;
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insertion counter (may exceed capacity while wrapping)
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

/// All live shots and men
#[derive(Debug, Clone)]
pub struct EntityStore {
    pub shots: EntityRing<Projectile>,
    pub men: EntityRing<Target>,
}

impl EntityStore {
    pub fn new(max_shots: usize, max_men: usize, policy: OverflowPolicy) -> Self {
        Self {
            shots: EntityRing::new(max_shots, policy),
            men: EntityRing::new(max_men, policy),
        }
    }

    pub fn add_projectile(&mut self, pos: Vec2, vel: Vec2) -> usize {
        self.shots.insert(Projectile { pos, vel })
    }

    pub fn add_target(&mut self, pos: Vec2, speed: f32) -> usize {
        self.men.insert(Target { pos, speed })
    }

    pub fn remove_projectile_at(&mut self, index: usize) -> Option<Projectile> {
        self.shots.remove_at(index)
    }

    pub fn remove_target_at(&mut self, index: usize) -> Option<Target> {
        self.men.remove_at(index)
    }

    /// Drop every man (round reset). Shots are kept.
    pub fn clear_targets(&mut self) {
        self.men.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shot(x: f32) -> (Vec2, Vec2) {
        (Vec2::new(x, 0.0), Vec2::ZERO)
    }

    #[test]
    fn test_101st_shot_overwrites_slot_zero() {
        let mut store = EntityStore::new(100, 100, OverflowPolicy::Wrap);
        for i in 0..100 {
            let (p, v) = shot(i as f32);
            assert_eq!(store.add_projectile(p, v), i);
        }
        let (p, v) = shot(1000.0);
        assert_eq!(store.add_projectile(p, v), 0);
        assert_eq!(store.shots.len(), 100);
        assert_eq!(store.shots.count(), 101);
        assert_eq!(store.shots.get(0).map(|s| s.pos.x), Some(1000.0));
        // Next one wraps to slot 1
        let (p, v) = shot(2000.0);
        assert_eq!(store.add_projectile(p, v), 1);
    }

    #[test]
    fn test_remove_compacts_in_order() {
        let mut store = EntityStore::new(10, 10, OverflowPolicy::Wrap);
        for i in 0..5 {
            store.add_target(Vec2::new(i as f32, 0.0), 50.0);
        }
        let removed = store.remove_target_at(1).expect("index in range");
        assert_eq!(removed.pos.x, 1.0);
        let xs: Vec<f32> = store.men.iter().map(|m| m.pos.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 3.0, 4.0]);
        assert_eq!(store.men.count(), 4);
        assert!(store.remove_target_at(10).is_none());
    }

    #[test]
    fn test_removal_after_wrap_resets_counter() {
        let mut ring = EntityRing::new(3, OverflowPolicy::Wrap);
        for i in 0..5 {
            ring.insert(i);
        }
        // slots: [3, 4, 2]
        assert_eq!(ring.as_slice(), &[3, 4, 2]);
        ring.remove_at(0);
        assert_eq!(ring.count(), 2);
        assert_eq!(ring.insert(9), 2);
        assert_eq!(ring.as_slice(), &[4, 2, 9]);
    }

    #[test]
    fn test_clear_targets_keeps_shots() {
        let mut store = EntityStore::new(10, 10, OverflowPolicy::Wrap);
        store.add_projectile(Vec2::ZERO, Vec2::ONE);
        store.add_target(Vec2::ZERO, 60.0);
        store.clear_targets();
        assert!(store.men.is_empty());
        assert_eq!(store.men.count(), 0);
        assert_eq!(store.shots.len(), 1);
    }

    #[test]
    fn test_grow_policy_exceeds_capacity() {
        let mut ring = EntityRing::new(2, OverflowPolicy::Grow);
        for i in 0..5 {
            assert_eq!(ring.insert(i), i);
        }
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_retain_reports_removed() {
        let mut ring = EntityRing::new(10, OverflowPolicy::Wrap);
        for i in 0..6 {
            ring.insert(i);
        }
        assert_eq!(ring.retain(|v| v % 2 == 0), 3);
        assert_eq!(ring.as_slice(), &[0, 2, 4]);
        assert_eq!(ring.count(), 3);
    }

    proptest! {
        #[test]
        fn wrap_len_never_exceeds_capacity(cap in 1usize..20, inserts in 0usize..100) {
            let mut ring = EntityRing::new(cap, OverflowPolicy::Wrap);
            for i in 0..inserts {
                ring.insert(i);
            }
            prop_assert_eq!(ring.len(), inserts.min(cap));
            prop_assert_eq!(ring.count(), inserts);
        }
    }
}
