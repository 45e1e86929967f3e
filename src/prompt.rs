//! Confirmation seam for the sweep engine.

use std::io::{self, BufRead, Write};

/// Blocking yes/no confirmation, injected into the engine so tests can
/// script answers instead of reading a terminal.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Interactive numbered-choice prompt on stdin/stdout. Re-prompts until the
/// operator picks one of the offered answers; there is no default and no
/// timeout.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut line = String::new();
        loop {
            println!("{question}");
            println!("  1) Yes");
            println!("  2) No");
            print!("> ");
            io::stdout().flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stdin closed while waiting for confirmation",
                ));
            }
            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer 1 (Yes) or 2 (No)."),
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" => Some(true),
        "2" | "n" | "no" => Some(false),
        _ => None,
    }
}
