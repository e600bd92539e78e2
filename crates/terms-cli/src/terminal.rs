//! Raw-mode line editor for interactive terminals.
//!
//! Supports plain typing, Backspace, Ctrl+U, Tab completion of categories,
//! Enter, Ctrl+D (end of input on an empty line) and Ctrl+C (interrupt).

use std::io::{self, Write};

use crossterm::{
  cursor::{RestorePosition, SavePosition},
  event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
  queue,
  style::Print,
  terminal::{self, Clear, ClearType},
};
use terms_core::{
  completion::CategoryCompleter,
  input::{Input, LineSource},
};

// ─── Editor state ─────────────────────────────────────────────────────────────

/// What the terminal should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
  Nothing,
  Redraw,
  /// Print the candidates below the prompt, then redraw it.
  List(Vec<String>),
  Done(Input),
}

/// The line being edited. Kept apart from the terminal so it can be tested.
#[derive(Debug, Default)]
struct LineEditor {
  buffer:      String,
  /// Set after a Tab that could not extend the buffer.
  tab_pending: bool,
}

impl LineEditor {
  fn handle_key(&mut self, key: KeyEvent, completer: Option<&CategoryCompleter>) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code != KeyCode::Tab {
      self.tab_pending = false;
    }

    match key.code {
      KeyCode::Char('c') if ctrl => Action::Done(Input::Interrupted),
      KeyCode::Char('d') if ctrl => {
        if self.buffer.is_empty() {
          Action::Done(Input::EndOfInput)
        } else {
          Action::Nothing
        }
      }
      KeyCode::Char('u') if ctrl => {
        self.buffer.clear();
        Action::Redraw
      }
      KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
        self.buffer.push(c);
        Action::Redraw
      }
      KeyCode::Backspace => {
        self.buffer.pop();
        Action::Redraw
      }
      KeyCode::Enter => Action::Done(Input::Line(std::mem::take(&mut self.buffer))),
      KeyCode::Tab => self.complete(completer),
      _ => Action::Nothing,
    }
  }

  fn complete(&mut self, completer: Option<&CategoryCompleter>) -> Action {
    let Some(completer) = completer else {
      return Action::Nothing;
    };

    let matches = completer.complete(&self.buffer);
    if matches.is_empty() {
      return Action::Nothing;
    }

    let extended = completer.common_prefix(&self.buffer);
    if extended.len() > self.buffer.len() {
      self.buffer = extended;
      return Action::Redraw;
    }

    if matches.len() > 1 {
      if self.tab_pending {
        self.tab_pending = false;
        return Action::List(matches.into_iter().map(str::to_owned).collect());
      }
      self.tab_pending = true;
    }
    Action::Nothing
  }
}

// ─── Terminal source ──────────────────────────────────────────────────────────

/// A [`LineSource`] reading key events from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalSource;

impl TerminalSource {
  pub fn new() -> Self { Self }
}

impl LineSource for TerminalSource {
  fn read_line(
    &mut self,
    prompt: &str,
    completer: Option<&CategoryCompleter>,
  ) -> io::Result<Input> {
    let mut stdout = io::stdout();
    queue!(stdout, Print(prompt), SavePosition)?;
    stdout.flush()?;

    terminal::enable_raw_mode()?;
    let result = edit_line(&mut stdout, prompt, completer);
    // Restore the terminal even if editing failed.
    let restored = terminal::disable_raw_mode();

    let input = result?;
    restored?;
    Ok(input)
  }
}

/// Leave raw mode if a line is being edited. Safe to call at any time.
pub fn restore() { terminal::disable_raw_mode().ok(); }

fn edit_line(
  out: &mut impl Write,
  prompt: &str,
  completer: Option<&CategoryCompleter>,
) -> io::Result<Input> {
  let mut editor = LineEditor::default();

  loop {
    let Event::Key(key) = event::read()? else {
      continue;
    };
    if key.kind != KeyEventKind::Press {
      continue;
    }

    match editor.handle_key(key, completer) {
      Action::Nothing => {}
      Action::Done(input) => {
        if input == Input::Interrupted {
          queue!(out, Print("^C"))?;
        }
        queue!(out, Print("\r\n"))?;
        out.flush()?;
        return Ok(input);
      }
      action => show(out, prompt, &editor.buffer, &action)?,
    }
  }
}

/// Update the screen after a [`Action::Redraw`] or [`Action::List`].
///
/// The prompt may wrap onto several rows, so only the text after the saved
/// prompt position is rewritten. Listing candidates prints a fresh prompt
/// below them.
fn show(out: &mut impl Write, prompt: &str, buffer: &str, action: &Action) -> io::Result<()> {
  match action {
    Action::Redraw => {
      queue!(out, RestorePosition, Clear(ClearType::FromCursorDown), Print(buffer))?;
    }
    Action::List(candidates) => {
      queue!(
        out,
        Print("\r\n"),
        Print(candidates.join("  ")),
        Print("\r\n"),
        Print(prompt),
        SavePosition,
        Print(buffer),
      )?;
    }
    Action::Nothing | Action::Done(_) => {}
  }
  out.flush()
}
