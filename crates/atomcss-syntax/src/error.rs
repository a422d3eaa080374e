//! Error types for CSS parsing.
//!
//! Copyright (c) 2025 Posit, PBC

use cssparser::{BasicParseErrorKind, ParseErrorKind, ToCss};
use thiserror::Error;

/// A syntax error with the position where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn from_css(error: cssparser::ParseError<'_, &'static str>) -> Self {
        let message = match error.kind {
            ParseErrorKind::Custom(message) => message.to_string(),
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected '{}'", token.to_css_string())
            }
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                "unexpected end of input".to_string()
            }
            ParseErrorKind::Basic(_) => "invalid syntax".to_string(),
        };
        Self::new(
            message,
            error.location.line as usize + 1,
            error.location.column as usize,
        )
    }
}
