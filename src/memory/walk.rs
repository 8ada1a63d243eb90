//! Walking the heap block by block
//!
//! Blocks are contiguous so the walk needs no free list, just the
//! header tags. Raw byte writes can smash a tag, so the walk treats
//! any impossible extent as the end of the heap rather than striding
//! out of bounds.

use super::tag::{Tag, MIN_BLOCK_BYTES, TAG_BYTES};

/// A decoded view of one block, addresses relative to the heap start
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockView {
    /// Address of the header byte
    pub addr: usize,
    /// Extent of the block, tags included
    pub size: usize,
    pub allocated: bool,
}

impl BlockView {
    /// Address of the first payload byte
    pub fn payload_addr(&self) -> usize {
        self.addr + 1
    }

    /// Bytes of payload between the tags
    pub fn payload_size(&self) -> usize {
        self.size - TAG_BYTES
    }

    /// Address of the footer byte
    pub fn footer_addr(&self) -> usize {
        self.addr + self.size - 1
    }
}

/// Iterator over the blocks of a heap, in address order
pub struct Blocks<'heap> {
    bytes: &'heap [u8],
    at: usize,
}

impl<'heap> Blocks<'heap> {
    pub(crate) fn new(bytes: &'heap [u8]) -> Self {
        Blocks { bytes, at: 0 }
    }
}

impl<'heap> Iterator for Blocks<'heap> {
    type Item = BlockView;

    fn next(&mut self) -> Option<Self::Item> {
        // a block needs room for both tags from here
        if self.at + 1 >= self.bytes.len() {
            return None;
        }

        let tag = Tag::from_byte(self.bytes[self.at]);
        let size = tag.size();
        if size < MIN_BLOCK_BYTES || self.at + size > self.bytes.len() {
            return None;
        }

        let view = BlockView {
            addr: self.at,
            size,
            allocated: tag.is_allocated(),
        };
        self.at += size;
        Some(view)
    }
}
