//! Interactive confirmation before destructive operations.

use std::io::{self, BufRead, Write};

/// Answers accepted as "yes". Matching is exact and case-sensitive: `Y` and
/// `YES` are refusals.
pub const AFFIRMATIVE: [&str; 3] = ["y", "Yes", "yes"];

pub fn is_affirmative(answer: &str) -> bool { AFFIRMATIVE.contains(&answer) }

/// Something that can ask an operator a yes/no question.
pub trait Confirm {
  fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// A [`Confirm`] that writes the question to `output` and reads a single
/// line answer from `input`.
pub struct TerminalPrompt<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self { Self::new(io::stdin().lock(), io::stdout()) }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
  fn confirm(&mut self, message: &str) -> io::Result<bool> {
    write!(self.output, "{message}")?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      // EOF counts as a refusal.
      writeln!(self.output)?;
      return Ok(false);
    }

    let answer = line.strip_suffix('\n').unwrap_or(&line);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);
    Ok(is_affirmative(answer))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  fn ask(input: &str) -> (bool, String) {
    let mut out = Vec::new();
    let answer = TerminalPrompt::new(Cursor::new(input.as_bytes()), &mut out)
      .confirm("Proceed? ")
      .unwrap();
    (answer, String::from_utf8(out).unwrap())
  }

  #[test]
  fn accepted_tokens() {
    for token in ["y\n", "Yes\n", "yes\n", "yes\r\n", "y"] {
      assert!(ask(token).0, "{token:?} should be accepted");
    }
  }

  #[test]
  fn rejected_tokens() {
    for token in ["Y\n", "YES\n", "n\n", "\n", " y\n", "yes \n", "no\n"] {
      assert!(!ask(token).0, "{token:?} should be rejected");
    }
  }

  #[test]
  fn eof_is_refusal() {
    let (answer, out) = ask("");
    assert!(!answer);
    assert_eq!(out, "Proceed? \n");
  }

  #[test]
  fn message_is_written_before_reading() {
    let (_, out) = ask("y\n");
    assert_eq!(out, "Proceed? ");
  }
}
