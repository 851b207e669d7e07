//! Line sources and the driver loop for the calculator.
//!
//! A [LineSource] supplies one line of input per call and doubles as the
//! output sink for results and diagnostics.  The interactive source wraps a
//! rustyline editor; the piped source reads a single line from stdin; the
//! scripted source replays a transcript and asserts the produced output,
//! which is how whole sessions get tested.

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::history::MemHistory;
use rustyline::Editor;

use crate::evaluator::{Error, Evaluator};

//////////////////////////////////////////// LineSource ////////////////////////////////////////////

/// A [LineSource] feeds the evaluator one line at a time and absorbs its
/// output.  Returns None at end of input.
pub trait LineSource: Write {
    /// The next line of input, or None when the input is exhausted.
    fn next_line(&mut self) -> Option<String>;

    /// Report a diagnostic that belongs on stderr.
    fn report(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

////////////////////////////////////////// ShellLineSource /////////////////////////////////////////

/// An interactive [LineSource] backed by a rustyline editor.  Each accepted
/// line is recorded in the editor's history.
pub struct ShellLineSource {
    rl: Editor<(), MemHistory>,
    prompt: &'static str,
}

impl ShellLineSource {
    /// Wrap an editor, prompting with `prompt` before every line.
    pub fn new(rl: Editor<(), MemHistory>, prompt: &'static str) -> Self {
        Self { rl, prompt }
    }
}

impl Write for ShellLineSource {
    fn write(&mut self, buf: &[u8]) -> Result<usize, std::io::Error> {
        std::io::stdout().write(buf)
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        std::io::stdout().flush()
    }
}

impl LineSource for ShellLineSource {
    fn next_line(&mut self) -> Option<String> {
        let line = self.rl.readline(self.prompt);
        match line {
            Ok(line) => {
                let _ = self.rl.add_history_entry(line.as_str());
                Some(line.trim().to_owned())
            }
            Err(ReadlineError::Interrupted) => {
                std::process::exit(1);
            }
            Err(ReadlineError::Eof) => None,
            Err(err) => {
                panic!("could not read line: {}", err);
            }
        }
    }
}

////////////////////////////////////////// PipedLineSource /////////////////////////////////////////

/// A [LineSource] for non-interactive input: reads exactly one line from
/// stdin, evaluates it, and signals end of input.
#[derive(Default)]
pub struct PipedLineSource {
    consumed: bool,
}

impl Write for PipedLineSource {
    fn write(&mut self, buf: &[u8]) -> Result<usize, std::io::Error> {
        std::io::stdout().write(buf)
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        std::io::stdout().flush()
    }
}

impl LineSource for PipedLineSource {
    fn next_line(&mut self) -> Option<String> {
        if self.consumed {
            return None;
        }
        self.consumed = true;
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_owned()),
        }
    }
}

///////////////////////////////////////// ScriptLineSource /////////////////////////////////////////

/// A [LineSource] that replays a scripted session and asserts the output.
///
/// Lines beginning with `"> "` are commands; the lines between two commands
/// are the output the preceding commands must have produced, stderr
/// diagnostics included.  The final stretch of output is checked when the
/// script runs out.
#[derive(Default)]
pub struct ScriptLineSource {
    input_lines: Vec<String>,
    output_buffer: Vec<u8>,
}

impl ScriptLineSource {
    /// Build a source that replays `script`.
    pub fn new(script: &str) -> Self {
        let input_lines = script.lines().map(|s| s.to_owned()).collect();
        Self {
            input_lines,
            output_buffer: Vec::new(),
        }
    }

    fn check_output(&mut self, expected: &str) {
        let got = String::from_utf8(self.output_buffer.clone()).expect("output should be utf8");
        assert_eq!(expected.trim(), got.trim());
        self.output_buffer.clear();
    }
}

impl Write for ScriptLineSource {
    fn write(&mut self, buf: &[u8]) -> Result<usize, std::io::Error> {
        self.output_buffer.write(buf)
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.output_buffer.flush()
    }
}

impl LineSource for ScriptLineSource {
    fn next_line(&mut self) -> Option<String> {
        let mut expected_output = String::new();
        loop {
            if !self.input_lines.is_empty() && self.input_lines[0].starts_with("> ") {
                let cmd = self.input_lines.remove(0);
                self.check_output(&expected_output);
                return Some(cmd[2..].to_owned());
            } else if !self.input_lines.is_empty() {
                if !expected_output.is_empty() {
                    expected_output += "\n";
                }
                expected_output += &self.input_lines.remove(0);
            } else {
                self.check_output(&expected_output);
                return None;
            }
        }
    }

    fn report(&mut self, message: &str) {
        writeln!(self.output_buffer, "{}", message).expect("buffer write");
    }
}

/////////////////////////////////////////////// run ////////////////////////////////////////////////

/// Drive the evaluator with lines from the source until end of input.
///
/// The stack is reset (and dumped, when verbose) before every line; a blank
/// line just prompts again.  Expression errors are reported through the
/// source and the loop continues; only output failures end the session
/// early.
pub fn run<S: LineSource>(evaluator: &mut Evaluator, source: &mut S) -> Result<(), Error> {
    loop {
        evaluator.reset(source)?;
        if let Some(line) = source.next_line() {
            if line.is_empty() {
                continue;
            }
            match evaluator.evaluate_line(&line, source) {
                Ok(()) => {}
                Err(err @ Error::Io(_)) => {
                    return Err(err);
                }
                Err(err) => {
                    source.report(&format!("!! {}", err));
                }
            }
        } else {
            break;
        }
    }
    Ok(())
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_replays_commands() {
        let mut source = ScriptLineSource::new("> 3 4 +\n");
        assert_eq!(Some("3 4 +".to_owned()), source.next_line());
        assert_eq!(None, source.next_line());
    }

    #[test]
    fn script_checks_interleaved_output() {
        let mut source = ScriptLineSource::new("> first\nhello\n> second\n");
        assert_eq!(Some("first".to_owned()), source.next_line());
        writeln!(source, "hello").unwrap();
        assert_eq!(Some("second".to_owned()), source.next_line());
        assert_eq!(None, source.next_line());
    }

    #[test]
    #[should_panic]
    fn script_rejects_wrong_output() {
        let mut source = ScriptLineSource::new("> first\nhello\n> second\n");
        assert_eq!(Some("first".to_owned()), source.next_line());
        writeln!(source, "goodbye").unwrap();
        source.next_line();
    }

    #[test]
    fn run_evaluates_a_session() {
        let script = "> 3 4 +
 = 7.000
> 1 2
!! Malformed expression -- excess operands.
> 9 9 +
 = 18.000
";
        let mut evaluator = Evaluator::new();
        let mut source = ScriptLineSource::new(script);
        run(&mut evaluator, &mut source).unwrap();
    }

    #[test]
    fn run_resets_the_stack_between_lines() {
        let script = "> 1 2
!! Malformed expression -- excess operands.
> +
!! Malformed expression -- insufficient operands.
";
        let mut evaluator = Evaluator::new();
        let mut source = ScriptLineSource::new(script);
        run(&mut evaluator, &mut source).unwrap();
        assert!(evaluator.stack().is_empty());
    }

    #[test]
    fn run_skips_blank_lines() {
        let script = "> \n> 3 4 +\n = 7.000\n";
        let mut evaluator = Evaluator::new();
        let mut source = ScriptLineSource::new(script);
        run(&mut evaluator, &mut source).unwrap();
    }
}
