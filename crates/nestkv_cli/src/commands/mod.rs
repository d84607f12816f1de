//! Shell command parsing and execution.

pub mod dispatcher;
pub mod stats;

use thiserror::Error;

/// Help text listing every command.
pub const HELP: &str = "\
Available commands:
  SET <key> <value>   - Store a value under a key
  GET <key>           - Print the value of a key, or NULL if absent
  UNSET <key>         - Delete a key
  COUNTS <value>      - Print how many keys hold this value
  FIND <value>        - Print every key holding this value
  BEGIN               - Start a transaction
  ROLLBACK            - Discard the current transaction
  COMMIT              - Apply the current transaction to its parent
  END                 - Exit
  HELP                - Show this help";

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name is not recognised.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// The command got the wrong number of arguments.
    #[error("{command} expects {expected} argument(s), got {actual}")]
    Arity {
        /// Upper-cased command name.
        command: &'static str,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value>`
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET <key>`
    Get {
        /// Key to read.
        key: String,
    },
    /// `UNSET <key>`
    Unset {
        /// Key to delete.
        key: String,
    },
    /// `COUNTS <value>`
    Counts {
        /// Value to count.
        value: String,
    },
    /// `FIND <value>`
    Find {
        /// Value to look up.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
    /// `END`
    End,
    /// `HELP`
    Help,
}

impl Command {
    /// Parses one input line.
    ///
    /// The command name is case-insensitive; arguments are kept verbatim.
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match name.to_ascii_uppercase().as_str() {
            "SET" => {
                let [key, value] = take::<2>("SET", &args)?;
                Self::Set { key, value }
            }
            "GET" => {
                let [key] = take::<1>("GET", &args)?;
                Self::Get { key }
            }
            "UNSET" => {
                let [key] = take::<1>("UNSET", &args)?;
                Self::Unset { key }
            }
            "COUNTS" => {
                let [value] = take::<1>("COUNTS", &args)?;
                Self::Counts { value }
            }
            "FIND" => {
                let [value] = take::<1>("FIND", &args)?;
                Self::Find { value }
            }
            "BEGIN" => {
                take::<0>("BEGIN", &args)?;
                Self::Begin
            }
            "ROLLBACK" => {
                take::<0>("ROLLBACK", &args)?;
                Self::Rollback
            }
            "COMMIT" => {
                take::<0>("COMMIT", &args)?;
                Self::Commit
            }
            "END" => {
                take::<0>("END", &args)?;
                Self::End
            }
            "HELP" => {
                take::<0>("HELP", &args)?;
                Self::Help
            }
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(Some(command))
    }
}

/// Checks the argument count and copies the arguments out.
fn take<const N: usize>(command: &'static str, args: &[&str]) -> Result<[String; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Arity {
            command,
            expected: N,
            actual: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].to_string()))
}
