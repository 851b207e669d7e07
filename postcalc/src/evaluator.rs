//! Line evaluator for postfix expressions.
//!
//! The evaluator owns a bounded operand stack and the output precision and
//! verbosity settings.  Each token of a line either pushes a validated
//! operand, applies an operator to the top two stack values, or updates the
//! precision.  The first failure aborts the rest of the line and leaves the
//! stack as-is; clearing the stack between lines is the caller's job.

use std::io::Write;

use crate::tokenizer::{self, Operator, Token};

/// Maximum number of values the operand stack will hold.
pub const STACK_CAPACITY: usize = 64;

/// Number of fractional digits displayed until a precision directive says
/// otherwise.
pub const DEFAULT_PRECISION: usize = 3;

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// An error that aborts evaluation of the current line.
///
/// Every variant except [`Error::Io`] is recoverable at line granularity:
/// report it and move on to the next line.
#[derive(Debug)]
pub enum Error {
    /// The operand did not fully parse as a floating-point literal.
    BadInput(String),
    /// The operand literal overflowed the range of a double.
    InputOverflow,
    /// The operand literal underflowed to zero.
    InputUnderflow,
    /// The precision payload did not fully parse as a base-10 integer.
    BadPrecision,
    /// An operator was applied with fewer than two values on the stack.
    InsufficientOperands,
    /// More than one value remained when the line was exhausted.
    ExcessOperands,
    /// Division or remainder by zero.
    DivideByZero,
    /// An operator application overflowed to positive infinity.
    ResultOverflow,
    /// A push would exceed the stack capacity.
    StackOverflow,
    /// The output sink failed.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadInput(token) => write!(f, "Bad input: {}", token),
            Error::InputOverflow => write!(f, "Input overflow."),
            Error::InputUnderflow => write!(f, "Input underflow."),
            Error::BadPrecision => write!(f, "Bad precision specified"),
            Error::InsufficientOperands => {
                write!(f, "Malformed expression -- insufficient operands.")
            }
            Error::ExcessOperands => write!(f, "Malformed expression -- excess operands."),
            Error::DivideByZero => write!(f, "Divide by zero"),
            Error::ResultOverflow => write!(f, "Result overflow"),
            Error::StackOverflow => write!(f, "Stack overflow. Expression too large."),
            Error::Io(err) => write!(f, "could not write output: {}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/////////////////////////////////////////// parse_operand //////////////////////////////////////////

/// Parse and validate one operand.
///
/// The entire token must be consumed by the float grammar or the token is
/// [`Error::BadInput`].  A parsed magnitude of infinity, including the
/// literals `inf` and `infinity`, is [`Error::InputOverflow`].  A literal
/// whose mantissa carries a nonzero digit but parses to exactly zero is
/// [`Error::InputUnderflow`].  `nan` is accepted and propagates.
pub fn parse_operand(text: &str) -> Result<f64, Error> {
    let Ok(value) = text.parse::<f64>() else {
        return Err(Error::BadInput(text.to_string()));
    };
    if value.is_infinite() {
        return Err(Error::InputOverflow);
    }
    if value == 0.0 && mantissa_has_nonzero_digit(text) {
        return Err(Error::InputUnderflow);
    }
    Ok(value)
}

fn mantissa_has_nonzero_digit(text: &str) -> bool {
    text.split(['e', 'E'])
        .next()
        .unwrap_or("")
        .chars()
        .any(|c| matches!(c, '1'..='9'))
}

///////////////////////////////////////////// Evaluator ////////////////////////////////////////////

/// Evaluates postfix expression lines against a bounded operand stack.
///
/// The stack and the precision setting persist across lines; call
/// [`Evaluator::reset`] between lines to clear the stack.  Takes `&mut self`
/// throughout: not safe for concurrent use without external
/// synchronization.
#[derive(Debug)]
pub struct Evaluator {
    stack: Vec<f64>,
    precision: usize,
    verbose: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with an empty stack, the default precision, and
    /// diagnostics off.
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(STACK_CAPACITY),
            precision: DEFAULT_PRECISION,
            verbose: false,
        }
    }

    /// Enable or disable diagnostic traces and stack dumps.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// The current number of fractional digits used for display.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    /// Evaluate one line of postfix tokens, writing results to `out`.
    ///
    /// The first failure aborts the remainder of the line; the stack is left
    /// in whatever state it reached.  When the line is exhausted: more than
    /// one remaining value is [`Error::ExcessOperands`] (the stack stays
    /// populated), exactly one is popped and printed, zero prints nothing.
    ///
    /// An application that overflows to positive infinity consumes both
    /// operands and discards the result, so the stack ends two values short
    /// of what the failing operator's usual net-one reduction would leave.
    pub fn evaluate_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), Error> {
        for token in tokenizer::tokens(line) {
            match token {
                Token::Operator(op) => self.apply_operator(op, out)?,
                Token::Precision(payload) => self.set_precision(payload, out)?,
                Token::Operand(text) => self.push_operand(text)?,
            }
        }
        if self.stack.len() > 1 {
            return Err(Error::ExcessOperands);
        }
        if let Some(value) = self.stack.pop() {
            writeln!(out, " = {:.*}", self.precision, value)?;
        }
        Ok(())
    }

    /// Clear the stack, dumping it top-to-bottom first when verbose.
    ///
    /// The evaluator never clears its own stack mid-line; the driving loop
    /// calls this before requesting each new line.
    pub fn reset<W: Write>(&mut self, out: &mut W) -> Result<(), Error> {
        if self.stack.is_empty() {
            return Ok(());
        }
        if self.verbose {
            write!(out, ":: Stack Dump :: ")?;
            for value in self.stack.iter().rev() {
                write!(out, "{:.*} ", self.precision, value)?;
            }
            writeln!(out)?;
        }
        self.stack.clear();
        Ok(())
    }

    fn push_operand(&mut self, text: &str) -> Result<(), Error> {
        let value = parse_operand(text)?;
        if self.stack.len() >= STACK_CAPACITY {
            return Err(Error::StackOverflow);
        }
        self.stack.push(value);
        Ok(())
    }

    fn apply_operator<W: Write>(&mut self, op: Operator, out: &mut W) -> Result<(), Error> {
        if self.stack.len() < 2 {
            return Err(Error::InsufficientOperands);
        }
        // op2 is the most recently pushed value.
        let op2 = self.stack.pop().unwrap();
        let op1 = self.stack.pop().unwrap();
        let result = match op {
            Operator::Add => op1 + op2,
            Operator::Subtract => op1 - op2,
            Operator::Multiply => op1 * op2,
            Operator::Divide => {
                if op2.abs() < f64::EPSILON {
                    return Err(Error::DivideByZero);
                }
                op1 / op2
            }
            Operator::Remainder => {
                let divisor = op2 as i64;
                if divisor == 0 {
                    return Err(Error::DivideByZero);
                }
                ((op1 as i64) % divisor) as f64
            }
            Operator::Power => op1.powf(op2),
        };
        if result == f64::INFINITY {
            return Err(Error::ResultOverflow);
        }
        if self.verbose {
            writeln!(
                out,
                ":: {:.*} {} {:.*} = {:.*}",
                self.precision, op1, op, self.precision, op2, self.precision, result
            )?;
        }
        self.stack.push(result);
        Ok(())
    }

    fn set_precision<W: Write>(&mut self, payload: &str, out: &mut W) -> Result<(), Error> {
        let precision = if payload.is_empty() {
            // A bare colon reads as zero.
            0
        } else {
            payload.parse::<i64>().map_err(|_| Error::BadPrecision)?
        };
        self.precision = precision.max(0) as usize;
        writeln!(out, ":: Precision set to {} decimal places.", self.precision)?;
        Ok(())
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
