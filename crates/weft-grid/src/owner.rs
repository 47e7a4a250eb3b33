//! Generational owner registry.
//!
//! A cell records which grid it belongs to without keeping that grid alive.
//! Grids live in an [`OwnerRegistry`]; cells hold a copyable
//! [`OwnerHandle`]. Releasing a grid bumps its slot's generation, so every
//! outstanding handle to it stops resolving even after the slot is reused.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Index plus generation into an [`OwnerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerHandle {
    index: u32,
    generation: u32,
}

impl OwnerHandle {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<G> {
    generation: u32,
    value: Option<G>,
}

/// Arena of live owners addressed by generational handles.
#[derive(Debug)]
pub struct OwnerRegistry<G> {
    slots: Vec<Slot<G>>,
    free: Vec<u32>,
    live: usize,
}

impl<G> Default for OwnerRegistry<G> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<G> OwnerRegistry<G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `owner`, reusing a released slot when one is free.
    pub fn register(&mut self, owner: G) -> OwnerHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(owner);
            trace!(message = "owner.register", index, generation = slot.generation);
            return OwnerHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(owner),
        });
        trace!(message = "owner.register", index, generation = 0u32);
        OwnerHandle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: OwnerHandle) -> Option<&G> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: OwnerHandle) -> Option<&mut G> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Remove the owner. Every handle to it, including `handle`, goes stale.
    pub fn release(&mut self, handle: OwnerHandle) -> Option<G> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        trace!(message = "owner.release", index = handle.index, generation = handle.generation);
        Some(value)
    }

    pub fn is_alive(&self, handle: OwnerHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live owners.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
