//! Overall high-level error type for the simulator
use std::io;

use thiserror::Error;

use crate::memory::error::HeapError;

#[derive(Debug, Error)]
pub enum TagheapError {
    #[error(transparent)]
    Heap(#[from] HeapError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unknown command {0}")]
    UnknownCommand(String),
    #[error("{0} expects {1}")]
    BadUsage(&'static str, &'static str),
    #[error("bad numeric argument {0}")]
    BadNumber(String),
    #[error("address {0} is outside the heap")]
    AddressOutOfRange(usize),
    #[error("path {0} could not be read")]
    FileCouldNotBeRead(String),
}
