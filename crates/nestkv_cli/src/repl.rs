//! The read-eval-print loop.

use crate::commands::dispatcher::{Dispatcher, Outcome};
use crate::commands::HELP;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Options for a shell session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Print a banner, the help text and a prompt.
    pub interactive: bool,
}

/// Feeds lines from `input` to `dispatcher` until `END` or end of input.
///
/// Returns the number of lines read.
pub fn run<R, W>(
    mut input: R,
    dispatcher: &mut Dispatcher<W>,
    options: SessionOptions,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    if options.interactive {
        writeln!(dispatcher.out(), "nestkv v{}", nestkv_core::VERSION)?;
        writeln!(dispatcher.out(), "{HELP}")?;
    }

    let mut lines = 0;
    let mut buf = String::new();
    loop {
        if options.interactive {
            write!(dispatcher.out(), "> ")?;
            dispatcher.out().flush()?;
        }

        buf.clear();
        if input.read_line(&mut buf)? == 0 {
            info!(lines, "end of input");
            break;
        }
        lines += 1;
        debug!(line = buf.trim_end(), "read");

        if dispatcher.execute_line(&buf)? == Outcome::Exit {
            break;
        }
    }

    dispatcher.out().flush()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestkv_core::LayerStack;

    fn session(script: &str) -> (String, usize) {
        let mut dispatcher = Dispatcher::new(LayerStack::new(), Vec::new());
        let lines = run(script.as_bytes(), &mut dispatcher, SessionOptions::default()).unwrap();
        let output = String::from_utf8(dispatcher.out().clone()).unwrap();
        (output, lines)
    }

    #[test]
    fn runs_until_end_of_input() {
        let (output, lines) = session("SET a 1\nGET a\nFIND 1\n");
        assert_eq!(lines, 3);
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec!["Key 'a' changed: was 'NULL', now '1'", "1", "a"]
        );
    }

    #[test]
    fn stops_at_end_command() {
        let (output, lines) = session("SET a 1\nEND\nGET a\n");
        assert_eq!(lines, 2);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn skips_blank_and_invalid_lines() {
        let (output, _) = session("\n\nFOO\nGET a\n");
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec!["INVALID COMMAND: unknown command 'FOO'", "NULL"]
        );
    }

    #[test]
    fn last_line_without_newline() {
        let (output, lines) = session("SET a 1\nGET a");
        assert_eq!(lines, 2);
        assert_eq!(output.lines().last(), Some("1"));
    }

    #[test]
    fn interactive_prints_banner() {
        let mut dispatcher = Dispatcher::new(LayerStack::new(), Vec::new());
        run(
            "END\n".as_bytes(),
            &mut dispatcher,
            SessionOptions { interactive: true },
        )
        .unwrap();
        let output = String::from_utf8(dispatcher.out().clone()).unwrap();
        assert!(output.starts_with("nestkv v"));
        assert!(output.contains("Available commands:"));
        assert!(output.ends_with("> "));
    }
}
