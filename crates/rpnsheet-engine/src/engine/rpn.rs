//! RPN tokens and the stack machine that reduces them.
//!
//! Expressions are postfix: `"3 4 +"` is `3 + 4`. The evaluator only knows
//! numbers and the four arithmetic operators; references to other cells are
//! substituted by [`Cell::try_evaluate`](super::Cell::try_evaluate) before an
//! expression ever reaches [`evaluate`].

use std::fmt;

use super::error::RpnError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(s: &str) -> Option<Operator> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Apply `a OP b`. Division by zero yields IEEE infinities or NaN.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => a / b,
        }
    }
}

/// One element of a cell expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
    /// Anything that is neither a number nor an operator: the name of another cell.
    Ref(String),
}

impl Token {
    pub fn parse(raw: &str) -> Token {
        if let Some(op) = Operator::from_symbol(raw) {
            return Token::Op(op);
        }
        match raw.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Ref(raw.to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::Ref(name) => write!(f, "{}", name),
        }
    }
}

/// Split an expression on whitespace into tokens.
pub fn tokenize(expr: &str) -> Vec<Token> {
    expr.split_whitespace().map(Token::parse).collect()
}

/// Reduce a sequence of numbers and operators to a single value.
pub fn evaluate(tokens: &[Token]) -> Result<f64, RpnError> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Op(op) => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(RpnError::StackUnderflow {
                        operator: op.symbol(),
                        position,
                    });
                };
                stack.push(op.apply(a, b));
            }
            Token::Ref(name) => return Err(RpnError::UnresolvedReference(name.clone())),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        rest => Err(RpnError::UnbalancedStack {
            remaining: rest.len(),
        }),
    }
}

/// Tokenize and evaluate an expression in one step.
pub fn evaluate_str(expr: &str) -> Result<f64, RpnError> {
    evaluate(&tokenize(expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_classification() {
        assert_eq!(Token::parse("+"), Token::Op(Operator::Add));
        assert_eq!(Token::parse("/"), Token::Op(Operator::Div));
        assert_eq!(Token::parse("3"), Token::Number(3.0));
        assert_eq!(Token::parse("-2.5"), Token::Number(-2.5));
        assert_eq!(Token::parse("1e3"), Token::Number(1000.0));
        assert_eq!(Token::parse("A1"), Token::Ref("A1".to_string()));
        assert_eq!(Token::parse("%"), Token::Ref("%".to_string()));
    }

    #[test]
    fn test_evaluate_basic() {
        assert_eq!(evaluate_str("3 4 +"), Ok(7.0));
        assert_eq!(evaluate_str("42"), Ok(42.0));
        assert_eq!(evaluate_str("2 3 4 * +"), Ok(14.0));
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(evaluate_str("10 4 -"), Ok(6.0));
        assert_eq!(evaluate_str("8 2 /"), Ok(4.0));
        assert_eq!(evaluate_str("1 2 - 3 -"), Ok(-4.0));
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            evaluate_str("3 +"),
            Err(RpnError::StackUnderflow {
                operator: '+',
                position: 1
            })
        );
        assert!(matches!(
            evaluate_str("*"),
            Err(RpnError::StackUnderflow { .. })
        ));
    }

    #[test]
    fn test_unbalanced_stack() {
        assert_eq!(
            evaluate_str("3 4"),
            Err(RpnError::UnbalancedStack { remaining: 2 })
        );
        assert_eq!(
            evaluate_str(""),
            Err(RpnError::UnbalancedStack { remaining: 0 })
        );
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert_eq!(evaluate_str("4 0 /"), Ok(f64::INFINITY));
        assert_eq!(evaluate_str("-4 0 /"), Ok(f64::NEG_INFINITY));
        assert!(evaluate_str("0 0 /").unwrap().is_nan());
    }

    #[test]
    fn test_reference_reaching_evaluator() {
        assert_eq!(
            evaluate_str("A1 1 +"),
            Err(RpnError::UnresolvedReference("A1".to_string()))
        );
    }
}
