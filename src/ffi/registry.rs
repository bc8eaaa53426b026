//! Handle table - generation-checked slots behind the opaque handles
//!
//! A handle packs a 1-based slot index into its low 32 bits and the slot's
//! generation into its high 32 bits. Freeing a counter bumps its slot's
//! generation, so every handle issued before the free is stale from then on,
//! even after the slot is reused.
//!
//! Generations wrap after 2^32 reuses of one slot.

use crate::counter::PingPong;
use crate::errors::HandleError;
use crate::logging::debug;

/// Opaque counter handle as seen across the boundary; 0 is never issued
pub type Handle = u64;

/// Null handle
pub const NULL_HANDLE: Handle = 0;

/// Most live counters a handle can address (1-based u32 slot index)
pub const MAX_HANDLES: usize = u32::MAX as usize;

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<PingPong>,
}

/// Slot table owning every live counter
#[derive(Debug)]
pub struct HandleTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    capacity: usize,
}

#[inline]
fn encode(index: u32, generation: u32) -> Handle {
    (u64::from(generation) << 32) | (u64::from(index) + 1)
}

#[inline]
fn decode(handle: Handle) -> Result<(u32, u32), HandleError> {
    if handle == NULL_HANDLE {
        return Err(HandleError::Null);
    }

    let slot = handle as u32;
    if slot == 0 {
        return Err(HandleError::OutOfRange { index: 0 });
    }

    Ok((slot - 1, (handle >> 32) as u32))
}

impl HandleTable {
    /// Create table limited only by the handle encoding
    pub fn new() -> Self {
        Self::with_capacity(MAX_HANDLES)
    }

    /// Create table holding at most `capacity` live counters
    ///
    /// Capped at [`MAX_HANDLES`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            capacity: capacity.min(MAX_HANDLES),
        }
    }

    /// Number of live counters
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Maximum number of live counters
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take ownership of `counter`, returning its handle
    pub fn insert(&mut self, counter: PingPong) -> Result<Handle, HandleError> {
        if self.live >= self.capacity {
            return Err(HandleError::Exhausted { capacity: self.capacity });
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot { generation: 0, entry: None });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.entry.is_none(), "free list pointed at live slot");
        slot.entry = Some(counter);
        self.live += 1;

        let handle = encode(index, slot.generation);
        debug!(event = "handle_issued", handle, slot = index, generation = slot.generation);
        Ok(handle)
    }

    /// Borrow the counter behind `handle`
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut PingPong, HandleError> {
        let (index, generation) = decode(handle)?;

        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(HandleError::OutOfRange { index: index + 1 })?;

        let current = slot.generation;
        match slot.entry.as_mut() {
            Some(counter) if current == generation => Ok(counter),
            _ => Err(HandleError::Stale {
                index: index + 1,
                generation,
                current,
            }),
        }
    }

    /// Remove the counter behind `handle`, invalidating the handle
    pub fn remove(&mut self, handle: Handle) -> Result<PingPong, HandleError> {
        // Validates generation and liveness
        self.get_mut(handle)?;

        let (index, _) = decode(handle)?;
        let slot = &mut self.slots[index as usize];

        let counter = slot.entry.take().ok_or(HandleError::Stale {
            index: index + 1,
            generation: slot.generation,
            current: slot.generation,
        })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;

        debug!(event = "handle_released", handle, slot = index, next_generation = slot.generation);
        Ok(counter)
    }
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}
