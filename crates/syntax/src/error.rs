use thiserror::Error;

/// A parse error with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset where the error occurred
    pub offset: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

/// The text is not a well-formed GraphQL document.
///
/// Holds every error the parser reported; there is always at least one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error: {}", first_message(.errors))]
pub struct SyntaxError {
    pub errors: Vec<ParseError>,
}

fn first_message(errors: &[ParseError]) -> String {
    match errors {
        [] => "unknown".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

impl SyntaxError {
    pub(crate) fn empty_document() -> Self {
        Self {
            errors: vec![ParseError {
                message: "document contains no definitions".to_string(),
                offset: 0,
            }],
        }
    }
}
