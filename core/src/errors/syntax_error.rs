use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("SyntaxError: {message}")]
#[diagnostic(help("check the script syntax around this location"))]
pub struct SyntaxError {
    pub message: String,

    #[label("here")]
    pub span: miette::SourceSpan,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            message: message.into(),
            span: (offset, length).into(),
        }
    }

    /// Byte offset of the offending source text.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Width of the offending source text, at least one byte.
    pub fn width(&self) -> usize {
        self.span.len().max(1)
    }
}
