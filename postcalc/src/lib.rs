#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod evaluator;
mod repl;
mod tokenizer;

pub use evaluator::parse_operand;
pub use evaluator::Error;
pub use evaluator::Evaluator;
pub use evaluator::DEFAULT_PRECISION;
pub use evaluator::STACK_CAPACITY;
pub use repl::run;
pub use repl::LineSource;
pub use repl::PipedLineSource;
pub use repl::ScriptLineSource;
pub use repl::ShellLineSource;
pub use tokenizer::classify;
pub use tokenizer::tokens;
pub use tokenizer::Operator;
pub use tokenizer::Token;

/////////////////////////////////////////// PostcalcOptions ////////////////////////////////////////

/// Runtime options for the postcalc command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "command_line", derive(arrrg_derive::CommandLine))]
pub struct PostcalcOptions {
    /// Trace each operator application and dump the stack between lines.
    #[cfg_attr(
        feature = "command_line",
        arrrg(flag, "Trace operator applications and dump the stack between lines.")
    )]
    pub verbose: bool,
}
