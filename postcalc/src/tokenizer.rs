//! Tokenizer for postfix expression lines.
//!
//! A line is trimmed and split on runs of spaces and newlines into non-empty
//! tokens.  Each token is classified in precedence order:
//! - a single-character arithmetic operator: `+ - * / % ^`
//! - a precision directive: leading `:`, payload is the rest of the token
//! - an operand candidate, validated by the evaluator
//!
//! Tokens borrow from the line and do not outlive it.

/// An arithmetic operator applied to the top two values of the operand stack.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`, integer remainder after truncating both operands.
    Remainder,
    /// `^`, exponentiation.
    Power,
}

impl Operator {
    fn from_token(token: &str) -> Option<Operator> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "%" => Some(Operator::Remainder),
            "^" => Some(Operator::Power),
            _ => None,
        }
    }

    /// The character form of this operator.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Remainder => '%',
            Operator::Power => '^',
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A classified token borrowed from the current line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// A single-character arithmetic operator.
    Operator(Operator),
    /// A precision directive; the payload is everything after the colon.
    Precision(&'a str),
    /// An operand candidate; the payload is the raw token text.
    Operand(&'a str),
}

/// Classify one whitespace-delimited token.
pub fn classify(token: &str) -> Token<'_> {
    if let Some(op) = Operator::from_token(token) {
        Token::Operator(op)
    } else if let Some(payload) = token.strip_prefix(':') {
        Token::Precision(payload)
    } else {
        Token::Operand(token)
    }
}

/// Split a line into classified tokens.
///
/// The line is trimmed first; a blank line yields no tokens.  The trimmed
/// content is split on runs of spaces and newlines, so consecutive
/// delimiters are skipped silently.  Other whitespace stays inside a token
/// and surfaces downstream as bad input.
pub fn tokens(line: &str) -> impl Iterator<Item = Token<'_>> {
    line.trim()
        .split([' ', '\n'])
        .filter(|t| !t.is_empty())
        .map(classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators() {
        for (text, op) in [
            ("+", Operator::Add),
            ("-", Operator::Subtract),
            ("*", Operator::Multiply),
            ("/", Operator::Divide),
            ("%", Operator::Remainder),
            ("^", Operator::Power),
        ] {
            assert_eq!(Token::Operator(op), classify(text));
            assert_eq!(text, op.to_string());
        }
    }

    #[test]
    fn multi_character_operator_is_an_operand() {
        assert_eq!(Token::Operand("++"), classify("++"));
        assert_eq!(Token::Operand("+5"), classify("+5"));
        println!("Classified: {:?}", classify("++"));
    }

    #[test]
    fn precision_directive() {
        assert_eq!(Token::Precision("2"), classify(":2"));
        assert_eq!(Token::Precision("-5"), classify(":-5"));
        println!("Classified: {:?}", classify(":2"));
    }

    #[test]
    fn precision_directive_empty_payload() {
        assert_eq!(Token::Precision(""), classify(":"));
    }

    #[test]
    fn precision_directive_odd_payloads() {
        assert_eq!(Token::Precision(":"), classify("::"));
        assert_eq!(Token::Precision("+"), classify(":+"));
    }

    #[test]
    fn operands() {
        assert_eq!(Token::Operand("3.14"), classify("3.14"));
        assert_eq!(Token::Operand("-5"), classify("-5"));
        assert_eq!(Token::Operand("abc"), classify("abc"));
    }

    #[test]
    fn simple_expression() {
        let tokens: Vec<Token> = tokens("3 4 +").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Operand("3"),
                Token::Operand("4"),
                Token::Operator(Operator::Add),
            ]
        );
        println!("Tokenized: {:?}", tokens);
    }

    #[test]
    fn blank_line_yields_no_tokens() {
        assert_eq!(0, tokens("").count());
        assert_eq!(0, tokens("   \n  ").count());
    }

    #[test]
    fn consecutive_delimiters_are_skipped() {
        let tokens: Vec<Token> = tokens("3  4\n\n+").collect();
        assert_eq!(3, tokens.len());
        println!("Tokenized: {:?}", tokens);
    }

    #[test]
    fn leading_and_trailing_whitespace_is_trimmed() {
        let tokens: Vec<Token> = tokens("  3 4 +  \n").collect();
        assert_eq!(3, tokens.len());
    }

    #[test]
    fn interior_tab_stays_in_the_token() {
        let tokens: Vec<Token> = tokens("3\t4").collect();
        assert_eq!(vec![Token::Operand("3\t4")], tokens);
        println!("Tokenized: {:?}", tokens);
    }
}
