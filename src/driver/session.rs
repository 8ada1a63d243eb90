//! An interactive session against a single heap
//!
//! A session reads command lines, applies them to its heap and writes
//! any responses. Command failures are reported and the session keeps
//! going, so one bad line never ends a run.

use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
    time::Instant,
};

use itertools::Itertools;
use pretty_hex::pretty_hex;

use crate::driver::command::Command;
use crate::driver::error::TagheapError;
use crate::driver::statistics::Statistics;
use crate::memory::error::HeapError;
use crate::memory::heap::Heap;

const HELP: &str = "\
malloc SIZE     allocate SIZE bytes of payload, printing the address
free ADDR       release the allocation at payload address ADDR
blocklist       list blocks as address, payload size, state
writemem ADDR S write the bytes of S from ADDR, striding by each byte
printmem ADDR N print N bytes from ADDR in hex, striding by each byte
dump            hex dump the whole heap
help            show this summary
quit            leave the simulator
";

/// Whether the session carries on after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct Session {
    heap: Heap,
    statistics: Statistics,
}

impl Session {
    /// Create a session around a fresh heap of `heap_size` bytes
    pub fn new(heap_size: usize) -> Result<Self, HeapError> {
        Ok(Session {
            heap: Heap::new(heap_size)?,
            statistics: Statistics::default(),
        })
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    /// Read lines from `input` until quit or end of input
    ///
    /// With `prompt` set, a prompt is written before each line is
    /// read. Errors from individual commands are written to `out` and
    /// the loop continues.
    pub fn run(
        &mut self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
        prompt: bool,
    ) -> Result<(), TagheapError> {
        let started = Instant::now();

        loop {
            if prompt {
                write!(out, ">")?;
                out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let outcome = Command::parse(&line).and_then(|parsed| match parsed {
                Some(command) => self.execute(&command, out),
                None => Ok(Outcome::Continue),
            });

            match outcome {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    self.statistics.count_failure();
                    writeln!(out, "{e}")?;
                }
            }
        }

        self.statistics
            .timings_mut()
            .record("session", started.elapsed());

        Ok(())
    }

    /// Apply one command to the heap, writing any response to `out`
    pub fn execute(
        &mut self,
        command: &Command,
        out: &mut dyn Write,
    ) -> Result<Outcome, TagheapError> {
        self.statistics.count_command();

        match command {
            Command::Malloc(payload_size) => {
                let addr = self.heap.allocate(*payload_size)?;
                self.statistics.count_allocation();
                writeln!(out, "{addr}")?;
            }
            Command::Free(addr) => {
                self.heap.free(*addr)?;
                self.statistics.count_free();
            }
            Command::Blocklist => {
                for block in self.heap.blocks() {
                    writeln!(
                        out,
                        "{}, {}, {}.",
                        block.payload_addr(),
                        block.payload_size(),
                        if block.allocated { "allocated" } else { "free" }
                    )?;
                }
            }
            Command::Writemem(addr, text) => self.writemem(*addr, text)?,
            Command::Printmem(addr, count) => self.printmem(*addr, *count, out)?,
            Command::Dump => {
                writeln!(out, "{}", pretty_hex(&self.heap.as_bytes()))?;
            }
            Command::Help => {
                out.write_all(HELP.as_bytes())?;
            }
            Command::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Continue)
    }

    /// Write the bytes of `text` into the heap starting at `addr`
    ///
    /// After each byte the write position strides by that byte's tag
    /// size, so text laid over block headers follows the block chain.
    /// The walk stops quietly at the heap boundary.
    fn writemem(&mut self, addr: usize, text: &str) -> Result<(), TagheapError> {
        if self.heap.read_byte(addr).is_none() {
            return Err(TagheapError::AddressOutOfRange(addr));
        }

        let mut at = addr;
        for byte in text.bytes() {
            if self.heap.write_byte(at, byte).is_none() {
                break;
            }
            at += (byte >> 1) as usize;
        }

        Ok(())
    }

    /// Print up to `count` bytes in hex, striding as `writemem` does
    fn printmem(
        &self,
        addr: usize,
        count: usize,
        out: &mut dyn Write,
    ) -> Result<(), TagheapError> {
        if self.heap.read_byte(addr).is_none() {
            return Err(TagheapError::AddressOutOfRange(addr));
        }

        let mut bytes = Vec::new();
        let mut at = addr;
        while bytes.len() < count {
            match self.heap.read_byte(at) {
                Some(byte) => {
                    bytes.push(byte);
                    at += (byte >> 1) as usize;
                }
                None => break,
            }
        }

        if !bytes.is_empty() {
            writeln!(out, "{}", bytes.iter().map(|b| format!("{b:x}")).join(" "))?;
        }

        Ok(())
    }
}

/// Run the commands in the script at `path` against the session
pub fn run_script(
    session: &mut Session,
    path: &Path,
    out: &mut dyn Write,
) -> Result<(), TagheapError> {
    let started = Instant::now();
    let text = fs::read_to_string(path)
        .map_err(|_| TagheapError::FileCouldNotBeRead(path.display().to_string()))?;
    session
        .statistics_mut()
        .timings_mut()
        .record("read", started.elapsed());

    session.run(&mut text.as_bytes(), out, false)
}
