//! An interactive postfix expression calculator.

use std::io::IsTerminal;

use arrrg::CommandLine;

use rustyline::history::MemHistory;
use rustyline::{Config, Editor};

use postcalc::{run, Evaluator, PipedLineSource, PostcalcOptions, ShellLineSource};

fn main() {
    let (options, free) = PostcalcOptions::from_command_line_relaxed("USAGE: postcalc [--verbose]");
    if !free.is_empty() {
        panic!("free arguments are not accepted");
    }
    if options.verbose {
        eprintln!("::Stack dumps enabled::");
    }

    let mut evaluator = Evaluator::new();
    evaluator.set_verbose(options.verbose);

    // Interactive terminals get an editing loop; piped input gets exactly
    // one line.
    let result = if std::io::stdin().is_terminal() {
        let config = Config::builder()
            .max_history_size(1_000_000)
            .expect("history size")
            .history_ignore_dups(true)
            .expect("history dedup")
            .history_ignore_space(true)
            .build();
        let rl = Editor::with_history(config, MemHistory::new()).expect("line editor");
        let mut source = ShellLineSource::new(rl, "> ");
        run(&mut evaluator, &mut source)
    } else {
        let mut source = PipedLineSource::default();
        run(&mut evaluator, &mut source)
    };
    if let Err(err) = result {
        panic!("{}", err);
    }
}
