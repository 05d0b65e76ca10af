use thiserror::Error;

/// Terminal parse failure.
///
/// The carried offset is where consumption stopped, computed as total input
/// length minus the unconsumed remainder. A failed parser consumes no
/// further input; the session must be discarded and restarted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at byte {0}")]
    Syntax(usize),
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax(at) | ParseError::UnexpectedEnd(at) => *at,
        }
    }
}
