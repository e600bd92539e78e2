//! Line-oriented user input.

use std::io::{self, BufRead, Write};

use crate::completion::CategoryCompleter;

/// One read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
  Line(String),
  /// The user asked to finish and keep their work (e.g. Ctrl+D).
  EndOfInput,
  /// The user asked to abort and drop their work (e.g. Ctrl+C).
  Interrupted,
}

/// Something that can prompt for and return a line of text.
///
/// Implementations display `prompt` themselves. `completer`, when given,
/// supplies tab-completion candidates; sources without completion support
/// ignore it.
pub trait LineSource {
  fn read_line(
    &mut self,
    prompt: &str,
    completer: Option<&CategoryCompleter>,
  ) -> io::Result<Input>;
}

/// A [`LineSource`] over any buffered reader, echoing prompts to a writer.
///
/// Used for piped standard input and in tests. Running out of input is
/// reported as [`Input::EndOfInput`]; this source never reports an
/// interrupt.
pub struct ReaderSource<R, W> {
  reader: R,
  writer: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
  pub fn new(reader: R, writer: W) -> Self { Self { reader, writer } }

  pub fn into_writer(self) -> W { self.writer }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
  fn read_line(
    &mut self,
    prompt: &str,
    _completer: Option<&CategoryCompleter>,
  ) -> io::Result<Input> {
    self.writer.write_all(prompt.as_bytes())?;
    self.writer.flush()?;

    let mut line = String::new();
    if self.reader.read_line(&mut line)? == 0 {
      return Ok(Input::EndOfInput);
    }
    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(Input::Line(line.to_owned()))
  }
}
