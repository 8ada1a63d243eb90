//! A simulated byte heap managed with boundary tags

pub mod arena;
pub mod error;
pub mod heap;
pub mod tag;
pub mod walk;
