//! Runs the `add-terms` binary with piped standard input.

use std::{
  io::{BufRead as _, BufReader, Read as _, Write as _},
  path::Path,
  process::{Child, Command, Stdio},
};

use terms_store_sqlite::SqliteStore;

fn add_terms(database: &Path, args: &[&str]) -> Child {
  Command::new(env!("CARGO_BIN_EXE_add-terms"))
    .arg("--database")
    .arg(database)
    .args(args)
    .env_remove("RUST_LOG")
    .env_remove("ADD_TERMS_DATABASE")
    .env_remove("ADD_TERMS_POLICY")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .unwrap()
}

fn saved_questions(database: &Path) -> Vec<String> {
  SqliteStore::open(database)
    .unwrap()
    .entries()
    .unwrap()
    .into_iter()
    .map(|e| e.entry.question)
    .collect()
}

#[test]
fn end_of_input_saves_the_session() {
  let dir = tempfile::tempdir().unwrap();
  let db = dir.path().join("deck.db");

  let mut child = add_terms(&db, &["--force"]);
  child.stdin.take().unwrap().write_all(b"hi\nho\nc\n").unwrap();
  let output = child.wait_with_output().unwrap();

  assert_eq!(output.status.code(), Some(0));
  let log = String::from_utf8_lossy(&output.stderr);
  assert!(log.contains("Saving changes..."));
  assert!(log.contains("Exiting..."));
  assert_eq!(saved_questions(&db), ["hi"]);
}

#[test]
fn stray_argument_prints_usage_and_exits_1() {
  let dir = tempfile::tempdir().unwrap();
  let db = dir.path().join("deck.db");

  let output = add_terms(&db, &["stray"]).wait_with_output().unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: add-terms"));
  assert!(!db.exists());
}

#[cfg(unix)]
#[test]
fn sigint_on_piped_input_discards_and_exits_0() {
  let dir = tempfile::tempdir().unwrap();
  let db = dir.path().join("deck.db");

  let mut child = add_terms(&db, &["--force"]);
  // Keep stdin open so the next question blocks on the pipe.
  let mut stdin = child.stdin.take().unwrap();
  stdin.write_all(b"hi\nho\nc\n").unwrap();
  stdin.flush().unwrap();

  let mut stderr = BufReader::new(child.stderr.take().unwrap());
  let mut log = String::new();
  loop {
    let mut line = String::new();
    assert_ne!(stderr.read_line(&mut line).unwrap(), 0, "exited early:\n{log}");
    log.push_str(&line);
    if line.contains("New entry") {
      break;
    }
  }

  let killed = Command::new("kill")
    .args(["-INT", &child.id().to_string()])
    .status()
    .unwrap();
  assert!(killed.success());

  stderr.read_to_string(&mut log).unwrap();
  let status = child.wait().unwrap();
  drop(stdin);

  assert_eq!(status.code(), Some(0), "log:\n{log}");
  assert!(log.contains("Exiting without saving changes..."));
  assert!(log.contains("Exiting..."));
  assert!(saved_questions(&db).is_empty());
}
