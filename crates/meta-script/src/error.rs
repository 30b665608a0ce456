//! Script errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Unexpected character at offset {0}")]
    UnexpectedCharacter(usize),

    #[error("Unexpected token '{found}' at offset {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Empty expression")]
    EmptyExpression,

    #[error("Unknown binding: {0}")]
    UnknownBinding(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function {function} expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot read property '{0}' of null")]
    NullMember(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Numeric result out of range")]
    NumberOutOfRange,

    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Unterminated placeholder starting at offset {0}")]
    UnterminatedPlaceholder(usize),
}
