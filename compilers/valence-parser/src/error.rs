use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line numbers are 1-based and count header lines.
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },

    #[error("sheet has no header line")]
    MissingHeader,
}

impl ParseError {
    pub(crate) fn at(line: usize, reason: impl Into<String>) -> Self {
        ParseError::Line {
            line,
            reason: reason.into(),
        }
    }
}
