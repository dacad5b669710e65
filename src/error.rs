use thiserror::Error;

/// Fatal errors of the attribute parser. Anything else found in a
/// `Set-Cookie` value is recovered from and reported as a
/// [`Warning`](crate::diagnostics::Warning).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The value had no non-blank `;`-delimited segment
    #[error("Invalid set-cookie value: {0}")]
    Empty(String),
    /// The name/value segment had nothing before its `=`
    #[error("Invalid set-cookie value: {0}")]
    MissingName(String),
}

impl ParseError {
    /// The set-cookie value that failed to parse
    pub fn input(&self) -> &str {
        match self {
            ParseError::Empty(input) => input.as_str(),
            ParseError::MissingName(input) => input.as_str(),
        }
    }
}

/// Error type returned when a cookie value cannot be percent-decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed percent-escape at byte {index}")]
    MalformedEscape { index: usize },
    #[error("decoded bytes are not valid utf-8")]
    InvalidUtf8,
}
