//! Capture and report statistics for a simulator run

use std::{fmt::Display, time::Duration};

use indexmap::IndexMap;

#[derive(Default, Debug)]
pub struct Timings {
    timings: IndexMap<String, Duration>,
}

impl Timings {
    pub fn record<T: AsRef<str>>(&mut self, name: T, elapsed: Duration) {
        self.timings.insert(name.as_ref().to_string(), elapsed);
    }

    pub fn merge(&mut self, other: Timings) {
        self.timings.extend(other.timings.into_iter());
    }
}

impl Display for Timings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.timings.keys().map(|k| k.len()).max().unwrap_or_default() + 1;

        for (k, v) in &self.timings {
            writeln!(f, "{:width$}: {:14.9}s", k, v.as_secs_f64(), width = width)?;
        }
        Ok(())
    }
}

/// The statistics captured during a run
#[derive(Default, Debug)]
pub struct Statistics {
    commands: u64,
    allocations: u64,
    frees: u64,
    failures: u64,
    timings: Timings,
}

impl Statistics {
    pub fn count_command(&mut self) {
        self.commands += 1;
    }

    pub fn count_allocation(&mut self) {
        self.allocations += 1;
    }

    pub fn count_free(&mut self) {
        self.frees += 1;
    }

    pub fn count_failure(&mut self) {
        self.failures += 1;
    }

    pub fn commands(&self) -> u64 {
        self.commands
    }

    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    pub fn frees(&self) -> u64 {
        self.frees
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn timings_mut(&mut self) -> &mut Timings {
        &mut self.timings
    }

    pub fn merge(&mut self, other: Statistics) {
        self.commands += other.commands;
        self.allocations += other.allocations;
        self.frees += other.frees;
        self.failures += other.failures;
        self.timings.merge(other.timings);
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Commands    : {:10}", self.commands)?;
        writeln!(f, "Allocations : {:10}", self.allocations)?;
        writeln!(f, "Frees       : {:10}", self.frees)?;
        writeln!(f, "Failures    : {:10}", self.failures)?;
        writeln!(f)?;
        writeln!(f, "{}", self.timings)
    }
}
