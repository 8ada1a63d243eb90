//! The boundary-tag heap
//!
//! A `Heap` owns a small arena and carves it into contiguous blocks,
//! each bracketed by a header and footer tag. Allocation is a
//! first-fit scan with splitting, release coalesces with both
//! neighbours, so the blocks always partition the arena exactly and
//! no two free blocks ever sit side by side.

use std::fmt;

use super::arena::Arena;
use super::error::HeapError;
use super::tag::{Tag, MAX_HEAP_BYTES, MIN_BLOCK_BYTES, MIN_HEAP_BYTES, TAG_BYTES};
use super::walk::Blocks;

#[derive(Clone, PartialEq, Eq)]
pub struct Heap {
    arena: Arena,
}

impl Heap {
    /// Create a heap of `size` bytes holding a single free block
    pub fn new(size: usize) -> Result<Self, HeapError> {
        if !(MIN_HEAP_BYTES..=MAX_HEAP_BYTES).contains(&size) {
            return Err(HeapError::InvalidSize { requested: size });
        }

        let mut arena = Arena::new(size);
        let tag = Tag::free(size);
        let bytes = arena.bytes_mut();
        bytes[0] = tag.byte();
        bytes[size - 1] = tag.byte();

        Ok(Heap { arena })
    }

    /// Total heap extent in bytes
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    /// The largest payload any single allocation could take
    pub fn max_payload(&self) -> usize {
        self.size() - TAG_BYTES
    }

    /// Walk the blocks in address order
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new(self.arena.as_bytes())
    }

    /// Address of the first free block of at least `alloc_size` bytes
    pub fn first_fit(&self, alloc_size: usize) -> Option<usize> {
        self.blocks()
            .find(|block| !block.allocated && block.size >= alloc_size)
            .map(|block| block.addr)
    }

    /// Allocate a block for `payload_size` bytes of payload
    ///
    /// Splits the chosen block when the tail end is big enough to
    /// stand alone, otherwise the caller gets the whole block. The
    /// payload is not cleared. Returns the payload address.
    pub fn allocate(&mut self, payload_size: usize) -> Result<usize, HeapError> {
        if payload_size == 0 || payload_size > self.max_payload() {
            return Err(HeapError::InvalidPayloadSize {
                requested: payload_size,
                max_payload: self.max_payload(),
            });
        }

        let alloc_size = payload_size + TAG_BYTES;
        let addr = self
            .first_fit(alloc_size)
            .ok_or_else(|| self.out_of_memory(payload_size))?;

        let found = self.tag_at(addr).size();
        let (taken, remainder) = if found - alloc_size >= MIN_BLOCK_BYTES {
            (alloc_size, found - alloc_size)
        } else {
            (found, 0)
        };

        self.set_block(addr, Tag::allocated(taken));
        if remainder > 0 {
            self.set_block(addr + taken, Tag::free(remainder));
        }

        Ok(addr + 1)
    }

    /// Release the allocation whose payload starts at `addr`
    ///
    /// The address must be one returned by [`Heap::allocate`] and
    /// still live. The freed block is merged with any free neighbour
    /// on either side.
    pub fn free(&mut self, addr: usize) -> Result<(), HeapError> {
        let header = addr.checked_sub(1).ok_or(HeapError::NotAllocated { addr })?;
        let block = self
            .blocks()
            .find(|block| block.addr == header)
            .ok_or(HeapError::NotAllocated { addr })?;
        if !block.allocated {
            return Err(HeapError::NotAllocated { addr });
        }

        let bytes = self.arena.bytes_mut();
        bytes[block.addr] = Tag::from_byte(bytes[block.addr]).released().byte();
        bytes[block.footer_addr()] = Tag::from_byte(bytes[block.footer_addr()]).released().byte();

        let mut start = block.addr;
        let mut size = block.size;

        // absorb free predecessors, reading the footer before each
        while start > 0 {
            let pred = Tag::from_byte(bytes[start - 1]);
            if pred.is_allocated() {
                break;
            }
            let pred_size = pred.size();
            if pred_size < MIN_BLOCK_BYTES || pred_size > start {
                break;
            }
            start -= pred_size;
            size += pred_size;
        }

        // then free successors, reading the header after the run
        loop {
            let next = start + size;
            if next + 1 >= bytes.len() {
                break;
            }
            let succ = Tag::from_byte(bytes[next]);
            if succ.is_allocated() {
                break;
            }
            let succ_size = succ.size();
            if succ_size < MIN_BLOCK_BYTES || next + succ_size > bytes.len() {
                break;
            }
            size += succ_size;
        }

        let tag = Tag::free(size);
        bytes[start] = tag.byte();
        bytes[start + size - 1] = tag.byte();

        Ok(())
    }

    /// Read the raw byte at `addr`, tags and payloads alike
    pub fn read_byte(&self, addr: usize) -> Option<u8> {
        self.arena.get(addr)
    }

    /// Write a raw byte at `addr`, whatever it lands on
    pub fn write_byte(&mut self, addr: usize, byte: u8) -> Option<()> {
        self.arena.put(addr, byte)
    }

    /// The whole heap as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.arena.as_bytes()
    }

    fn tag_at(&self, addr: usize) -> Tag {
        Tag::from_byte(self.arena.as_bytes()[addr])
    }

    /// Write matching header and footer tags for a block at `addr`
    fn set_block(&mut self, addr: usize, tag: Tag) {
        let bytes = self.arena.bytes_mut();
        bytes[addr] = tag.byte();
        bytes[addr + tag.size() - 1] = tag.byte();
    }

    fn out_of_memory(&self, requested: usize) -> HeapError {
        let largest_free = self
            .blocks()
            .filter(|block| !block.allocated)
            .map(|block| block.payload_size())
            .max()
            .unwrap_or_default();
        HeapError::OutOfMemory {
            requested,
            largest_free,
        }
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heap[{}]", self.size())?;
        for block in self.blocks() {
            writeln!(
                f,
                "  {:>3} ({}) size {:>3}",
                block.addr,
                if block.allocated { 'A' } else { 'F' },
                block.size
            )?;
        }
        Ok(())
    }
}
