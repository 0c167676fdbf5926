//! Terminal prompt collaborator.

use habit_core::Prompter;
use std::io::{BufRead, Write};

/// Asks on stderr and reads the answer from stdin.
///
/// End of input or a read error counts as "no".
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    async fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => parse_answer(&line),
        }
    }

    async fn acknowledge(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
