//! Parsing lines of simulator input
//!
//! One command per line, a verb then whitespace-separated arguments.
//! Trailing words beyond those a verb takes are ignored.

use std::str::SplitWhitespace;

use crate::driver::error::TagheapError;

/// A parsed simulator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Allocate a payload of the given size
    Malloc(usize),
    /// Release the allocation at the given payload address
    Free(usize),
    /// List every block in address order
    Blocklist,
    /// Write raw bytes from an address, striding by each byte written
    Writemem(usize, String),
    /// Print raw bytes from an address, striding by each byte read
    Printmem(usize, usize),
    /// Hex dump the whole heap
    Dump,
    Help,
    Quit,
}

impl Command {
    /// Parse a line of input, `None` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, TagheapError> {
        let mut words = line.split_whitespace();
        let verb = match words.next() {
            Some(word) => word,
            None => return Ok(None),
        };

        let command = match verb {
            "malloc" => Command::Malloc(arg(&mut words, "malloc", "a payload size")?),
            "free" => Command::Free(arg(&mut words, "free", "an address")?),
            "blocklist" => Command::Blocklist,
            "writemem" => {
                let addr = arg(&mut words, "writemem", "an address and text")?;
                let text = words
                    .next()
                    .ok_or(TagheapError::BadUsage("writemem", "an address and text"))?;
                Command::Writemem(addr, text.to_string())
            }
            "printmem" => {
                let addr = arg(&mut words, "printmem", "an address and a count")?;
                let count = arg(&mut words, "printmem", "an address and a count")?;
                Command::Printmem(addr, count)
            }
            "dump" => Command::Dump,
            "help" => Command::Help,
            "quit" => Command::Quit,
            _ => return Err(TagheapError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

/// Take the next word as a numeric argument
fn arg(
    words: &mut SplitWhitespace<'_>,
    verb: &'static str,
    wants: &'static str,
) -> Result<usize, TagheapError> {
    let word = words.next().ok_or(TagheapError::BadUsage(verb, wants))?;
    word.parse()
        .map_err(|_| TagheapError::BadNumber(word.to_string()))
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn parses_to(line: &str, command: Command) {
        assert_eq!(Command::parse(line).unwrap(), Some(command));
    }

    #[test]
    pub fn test_parses_each_verb() {
        parses_to("malloc 10", Command::Malloc(10));
        parses_to("free 1", Command::Free(1));
        parses_to("blocklist", Command::Blocklist);
        parses_to("writemem 5 hello", Command::Writemem(5, "hello".to_string()));
        parses_to("printmem 5 4", Command::Printmem(5, 4));
        parses_to("dump", Command::Dump);
        parses_to("help", Command::Help);
        parses_to("quit", Command::Quit);
    }

    #[test]
    pub fn test_tolerates_whitespace_and_trailing_words() {
        parses_to("  malloc   10  ", Command::Malloc(10));
        parses_to("malloc 10 extra words", Command::Malloc(10));
        parses_to("quit now", Command::Quit);
    }

    #[test]
    pub fn test_blank_lines_parse_to_nothing() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t  ").unwrap(), None);
    }

    #[test]
    pub fn test_rejects_unknown_verbs() {
        assert!(matches!(
            Command::parse("mallod 10"),
            Err(TagheapError::UnknownCommand(v)) if v == "mallod"
        ));
    }

    #[test]
    pub fn test_rejects_missing_arguments() {
        assert!(matches!(
            Command::parse("malloc"),
            Err(TagheapError::BadUsage("malloc", _))
        ));
        assert!(matches!(
            Command::parse("writemem 5"),
            Err(TagheapError::BadUsage("writemem", _))
        ));
        assert!(matches!(
            Command::parse("printmem 5"),
            Err(TagheapError::BadUsage("printmem", _))
        ));
    }

    #[test]
    pub fn test_rejects_bad_numbers() {
        assert!(matches!(
            Command::parse("malloc ten"),
            Err(TagheapError::BadNumber(w)) if w == "ten"
        ));
        assert!(matches!(
            Command::parse("free -1"),
            Err(TagheapError::BadNumber(w)) if w == "-1"
        ));
    }
}
