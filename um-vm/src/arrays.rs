//! The array space: owns every word array, indexed by a 32-bit identifier.
//!
//! Identifier 0 is reserved for the array currently acting as the program
//! (see [`crate::Machine`]). Non-zero identifiers are opaque handles handed
//! out by [`ArraySpace::allocate`] and recycled through a LIFO freelist, so
//! allocate/deallocate are both O(1) and programs that churn allocations in a
//! tight loop don't grow the array space without bound.

use crate::error::ProgramError;

/// A freed slot holds `None`; this also lets deallocate-of-an-already-freed
/// identifier be detected instead of silently doing nothing.
pub struct ArraySpace {
    slots: Vec<Option<Vec<u32>>>,
    freelist: Vec<u32>,
}

impl ArraySpace {
    /// Construct an array space whose identifier 0 holds `program`.
    #[must_use]
    pub fn new(program: Vec<u32>) -> Self {
        Self {
            slots: vec![Some(program)],
            freelist: Vec::new(),
        }
    }

    /// Allocate a fresh, zero-filled array of `size` words and return its
    /// (non-zero) identifier. Reuses a freed identifier if one is available.
    pub fn allocate(&mut self, size: u32) -> u32 {
        let array = vec![0u32; size as usize];
        if let Some(id) = self.freelist.pop() {
            self.slots[id as usize] = Some(array);
            id
        } else {
            self.slots.push(Some(array));
            (self.slots.len() - 1) as u32
        }
    }

    /// Deallocate `id`, releasing its storage and returning the identifier to
    /// the freelist for future reuse.
    pub fn deallocate(&mut self, id: u32) -> Result<(), ProgramError> {
        if id == 0 {
            return Err(ProgramError::DeallocateReserved);
        }
        let slot = self
            .slots
            .get_mut(id as usize)
            .ok_or(ProgramError::InvalidArrayId(id))?;
        if slot.is_none() {
            return Err(ProgramError::DoubleFree(id));
        }
        *slot = None;
        self.freelist.push(id);
        Ok(())
    }

    /// Read the word at `offset` within array `id`.
    pub fn load(&self, id: u32, offset: u32) -> Result<u32, ProgramError> {
        let array = self.array(id)?;
        array
            .get(offset as usize)
            .copied()
            .ok_or(ProgramError::OutOfBounds {
                id,
                offset,
                len: array.len() as u32,
            })
    }

    /// Write `value` at `offset` within array `id`.
    pub fn store(&mut self, id: u32, offset: u32, value: u32) -> Result<(), ProgramError> {
        let len = self.array(id)?.len() as u32;
        let array = self.array_mut(id)?;
        match array.get_mut(offset as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ProgramError::OutOfBounds { id, offset, len }),
        }
    }

    /// Replace array 0 with a deep copy of array `id`. A no-op with respect
    /// to contents when `id == 0`.
    pub fn clone_into_zero(&mut self, id: u32) -> Result<(), ProgramError> {
        if id == 0 {
            return Ok(());
        }
        let copy = self.array(id)?.clone();
        self.slots[0] = Some(copy);
        Ok(())
    }

    /// Fetch the word at `offset` within array 0 (the executing program).
    pub fn fetch(&self, offset: u32) -> Result<u32, ProgramError> {
        let program = self.array(0).expect("array 0 is always live");
        program
            .get(offset as usize)
            .copied()
            .ok_or(ProgramError::FetchOverflow {
                pc: offset,
                len: program.len() as u32,
            })
    }

    fn array(&self, id: u32) -> Result<&Vec<u32>, ProgramError> {
        self.slots
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(ProgramError::InvalidArrayId(id))
    }

    fn array_mut(&mut self, id: u32) -> Result<&mut Vec<u32>, ProgramError> {
        self.slots
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or(ProgramError::InvalidArrayId(id))
    }
}
