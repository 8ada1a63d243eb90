//! Heap errors

use thiserror::Error;

use super::tag::{MAX_HEAP_BYTES, MIN_HEAP_BYTES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("invalid heap size {requested}: a heap is {} to {} bytes", MIN_HEAP_BYTES, MAX_HEAP_BYTES)]
    InvalidSize { requested: usize },
    #[error("invalid payload size {requested}: a payload is 1 to {max_payload} bytes")]
    InvalidPayloadSize { requested: usize, max_payload: usize },
    #[error("out of memory: no free block fits a {requested} byte payload (largest free payload {largest_free})")]
    OutOfMemory { requested: usize, largest_free: usize },
    #[error("nothing allocated at address {addr}")]
    NotAllocated { addr: usize },
}
