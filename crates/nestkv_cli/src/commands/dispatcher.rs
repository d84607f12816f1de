//! Maps parsed commands onto store operations and formats the replies.

use super::{Command, HELP};
use nestkv_core::{LayerStack, NULL};
use std::io::{self, Write};
use tracing::{debug, info};

/// What the shell should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading commands.
    Continue,
    /// Stop the session.
    Exit,
}

/// Executes commands against a store, writing replies to `out`.
pub struct Dispatcher<W: Write> {
    store: LayerStack,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    /// Creates a dispatcher owning `store`.
    pub fn new(store: LayerStack, out: W) -> Self {
        Self { store, out }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &LayerStack {
        &self.store
    }

    /// Returns the output sink.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Parses and executes one input line.
    ///
    /// Malformed lines are reported to the user and never end the session.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Outcome> {
        match Command::parse(line) {
            Ok(Some(command)) => self.dispatch(command),
            Ok(None) => Ok(Outcome::Continue),
            Err(err) => {
                debug!(line, %err, "rejected command");
                writeln!(self.out, "INVALID COMMAND: {err}")?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Executes a parsed command.
    pub fn dispatch(&mut self, command: Command) -> io::Result<Outcome> {
        match command {
            Command::Set { key, value } => {
                let old = self.store.set(&key, &value);
                let old = old.as_deref().unwrap_or(NULL);
                writeln!(self.out, "Key '{key}' changed: was '{old}', now '{value}'")?;
            }
            Command::Get { key } => {
                let value = self.store.get(&key).unwrap_or(NULL);
                writeln!(self.out, "{value}")?;
            }
            Command::Unset { key } => match self.store.unset(&key) {
                Some(old) => writeln!(self.out, "Key '{key}' removed: was '{old}'")?,
                None => writeln!(self.out, "Key '{key}' did not exist")?,
            },
            Command::Counts { value } => {
                writeln!(self.out, "{}", self.store.counts(&value))?;
            }
            Command::Find { value } => {
                let keys = self.store.find(&value);
                if keys.is_empty() {
                    writeln!(self.out, "{NULL}")?;
                } else {
                    writeln!(self.out, "{}", keys.join(" "))?;
                }
            }
            Command::Begin => {
                self.store.begin();
                writeln!(self.out, "Transaction started")?;
            }
            Command::Rollback => match self.store.rollback() {
                Ok(()) => writeln!(self.out, "Transaction rolled back")?,
                Err(_) => writeln!(self.out, "No active transaction")?,
            },
            Command::Commit => match self.store.commit() {
                Ok(()) => writeln!(self.out, "Transaction committed")?,
                Err(_) => writeln!(self.out, "No active transaction")?,
            },
            Command::End => {
                info!("session ended by END");
                return Ok(Outcome::Exit);
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher<Vec<u8>> {
        Dispatcher::new(LayerStack::new(), Vec::new())
    }

    /// Runs each line and returns the last line of output.
    fn run(dispatcher: &mut Dispatcher<Vec<u8>>, lines: &[&str]) -> String {
        for line in lines {
            dispatcher.execute_line(line).unwrap();
        }
        let output = String::from_utf8(dispatcher.out().clone()).unwrap();
        output.lines().last().unwrap_or_default().to_string()
    }

    #[test]
    fn get_begin_set_rollback() {
        let mut d = dispatcher();
        assert_eq!(run(&mut d, &["GET a"]), "NULL");
        assert_eq!(run(&mut d, &["BEGIN"]), "Transaction started");
        assert_eq!(
            run(&mut d, &["SET a 2"]),
            "Key 'a' changed: was 'NULL', now '2'"
        );
        assert_eq!(run(&mut d, &["ROLLBACK"]), "Transaction rolled back");
        assert_eq!(run(&mut d, &["GET a"]), "NULL");
    }

    #[test]
    fn nested_set_reports_previous() {
        let mut d = dispatcher();
        run(&mut d, &["BEGIN", "SET a 2", "BEGIN"]);
        assert_eq!(run(&mut d, &["SET a 1"]), "Key 'a' changed: was '2', now '1'");
        assert_eq!(run(&mut d, &["ROLLBACK", "GET a"]), "2");
        assert_eq!(run(&mut d, &["ROLLBACK", "GET a"]), "NULL");
    }

    #[test]
    fn counts_and_find_across_levels() {
        let mut d = dispatcher();
        run(&mut d, &["BEGIN", "SET a 1", "SET b 1", "BEGIN", "SET a 2", "SET b 2"]);
        assert_eq!(run(&mut d, &["COUNTS 2"]), "2");
        assert_eq!(run(&mut d, &["SET c 1", "COUNTS 1"]), "1");
        assert_eq!(run(&mut d, &["ROLLBACK", "FIND 1"]), "a b");
        assert_eq!(run(&mut d, &["FIND 2"]), "NULL");
        assert_eq!(run(&mut d, &["COUNTS 2"]), "0");
        assert_eq!(run(&mut d, &["ROLLBACK", "COUNTS 1"]), "0");
        assert_eq!(run(&mut d, &["FIND 1"]), "NULL");
    }

    #[test]
    fn unset_messages() {
        let mut d = dispatcher();
        assert_eq!(run(&mut d, &["UNSET a"]), "Key 'a' did not exist");
        assert_eq!(run(&mut d, &["SET a 5", "UNSET a"]), "Key 'a' removed: was '5'");
        assert_eq!(run(&mut d, &["GET a"]), "NULL");
    }

    #[test]
    fn writes_do_not_count_as_gets() {
        let mut d = dispatcher();
        run(&mut d, &["SET a 1", "SET a 2", "UNSET a", "UNSET b"]);
        assert_eq!(d.store().stats().gets(), 0);

        run(&mut d, &["GET a"]);
        assert_eq!(d.store().stats().gets(), 1);
    }

    #[test]
    fn commit_and_rollback_without_transaction() {
        let mut d = dispatcher();
        assert_eq!(run(&mut d, &["COMMIT"]), "No active transaction");
        assert_eq!(run(&mut d, &["ROLLBACK"]), "No active transaction");
    }

    #[test]
    fn end_exits() {
        let mut d = dispatcher();
        assert_eq!(d.execute_line("END").unwrap(), Outcome::Exit);
        assert_eq!(d.execute_line("GET a").unwrap(), Outcome::Continue);
    }

    #[test]
    fn invalid_commands_continue() {
        let mut d = dispatcher();
        assert_eq!(d.execute_line("UNKNOWN").unwrap(), Outcome::Continue);
        assert_eq!(
            run(&mut d, &[]),
            "INVALID COMMAND: unknown command 'UNKNOWN'"
        );
        assert_eq!(
            run(&mut d, &["SET a"]),
            "INVALID COMMAND: SET expects 2 argument(s), got 1"
        );
    }

    #[test]
    fn help_lists_commands() {
        let mut d = dispatcher();
        d.execute_line("HELP").unwrap();
        let output = String::from_utf8(d.out().clone()).unwrap();
        assert!(output.starts_with("Available commands:"));
        assert!(output.contains("ROLLBACK"));
    }

    #[test]
    fn blank_line_prints_nothing() {
        let mut d = dispatcher();
        d.execute_line("   ").unwrap();
        assert!(d.out().is_empty());
    }
}
