extern crate indexmap;
extern crate itertools;
extern crate thiserror;

pub mod driver;
pub mod memory;
