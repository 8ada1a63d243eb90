//! Command line argument handling with clap v4

use std::path::PathBuf;

use clap::Parser;

use crate::memory::tag::MAX_HEAP_BYTES;

/// Tagheap - a first-fit heap simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "th")]
#[command(about = "A first-fit boundary-tag heap simulator")]
#[command(version)]
pub struct TagheapOptions {
    /// Size of the simulated heap in bytes
    #[arg(short = 'H', long = "heap-size", default_value_t = MAX_HEAP_BYTES)]
    pub heap_size: usize,

    /// Print metrics to stderr before exiting
    #[arg(short = 'S', long = "statistics")]
    pub statistics: bool,

    /// Script of commands to run instead of an interactive session
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

impl TagheapOptions {
    pub fn statistics(&self) -> bool {
        self.statistics
    }

    /// Parse command line arguments
    pub fn from_args() -> Self {
        Self::parse()
    }
}
