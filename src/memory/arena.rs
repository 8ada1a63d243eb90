//! The fixed byte arena backing a heap
//!
//! All addresses in the simulator are indices into this arena. Reads
//! and writes are bounds-checked here so the layers above never index
//! out of range, whatever state the tags are in.

/// A fixed, zero-initialised run of bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Arena {
    bytes: Box<[u8]>,
}

impl Arena {
    /// Allocate a zero-filled arena of `size` bytes
    pub fn new(size: usize) -> Self {
        Arena {
            bytes: vec![0u8; size].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read the byte at `addr` if it is in range
    pub fn get(&self, addr: usize) -> Option<u8> {
        self.bytes.get(addr).copied()
    }

    /// Write `byte` at `addr` if it is in range
    pub fn put(&mut self, addr: usize, byte: u8) -> Option<()> {
        self.bytes.get_mut(addr).map(|slot| *slot = byte)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
