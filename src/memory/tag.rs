//! Boundary tags
//!
//! Every block starts and ends with a one-byte tag packing the block
//! extent and an allocated flag: size in the upper seven bits, flag in
//! the lowest bit. The matching footer lets a neighbour reach this
//! block's header without scanning.

/// Bytes of tag overhead per block (header plus footer)
pub const TAG_BYTES: usize = 2;

/// Smallest legal block, a header and footer with no payload between
pub const MIN_BLOCK_BYTES: usize = 2;

/// Smallest usable heap, one minimum block
pub const MIN_HEAP_BYTES: usize = MIN_BLOCK_BYTES;

/// Largest heap a seven-bit size field can span
pub const MAX_HEAP_BYTES: usize = (u8::MAX >> 1) as usize;

/// A decoded boundary tag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tag(u8);

impl Tag {
    /// Tag for a free block of `size` bytes
    pub fn free(size: usize) -> Self {
        debug_assert!(size <= MAX_HEAP_BYTES);
        Tag((size as u8) << 1)
    }

    /// Tag for an allocated block of `size` bytes
    pub fn allocated(size: usize) -> Self {
        debug_assert!(size <= MAX_HEAP_BYTES);
        Tag(((size as u8) << 1) | 1)
    }

    /// Reinterpret a raw heap byte as a tag
    pub fn from_byte(byte: u8) -> Self {
        Tag(byte)
    }

    /// The wire representation
    pub fn byte(&self) -> u8 {
        self.0
    }

    /// Block extent in bytes, tags included
    pub fn size(&self) -> usize {
        (self.0 >> 1) as usize
    }

    pub fn is_allocated(&self) -> bool {
        self.0 & 1 == 1
    }

    /// The same tag with the allocated flag cleared
    pub fn released(&self) -> Self {
        Tag(self.0 & !1)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_tag_is_a_single_byte() {
        assert_eq!(std::mem::size_of::<Tag>(), 1);
    }

    #[test]
    pub fn test_encodes_size_and_flag() {
        let tag = Tag::allocated(6);
        assert_eq!(tag.byte(), 13);
        assert_eq!(tag.size(), 6);
        assert!(tag.is_allocated());

        let tag = Tag::free(6);
        assert_eq!(tag.byte(), 12);
        assert_eq!(tag.size(), 6);
        assert!(!tag.is_allocated());
    }

    #[test]
    pub fn test_round_trips_through_raw_bytes() {
        for byte in 0..=u8::MAX {
            assert_eq!(Tag::from_byte(byte).byte(), byte);
        }
    }

    #[test]
    pub fn test_released_clears_only_the_flag() {
        assert_eq!(Tag::allocated(127).released(), Tag::free(127));
        assert_eq!(Tag::free(64).released(), Tag::free(64));
    }

    #[test]
    pub fn test_extremes() {
        assert_eq!(Tag::free(MAX_HEAP_BYTES).size(), MAX_HEAP_BYTES);
        assert_eq!(Tag::allocated(MAX_HEAP_BYTES).byte(), u8::MAX);
        assert_eq!(Tag::free(0).byte(), 0);
    }
}
