//! Driving simulator sessions from scripts or a terminal

pub mod command;
pub mod error;
pub mod options;
pub mod session;
pub mod statistics;
