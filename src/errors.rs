use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The caller handed in something the renderer cannot start from,
    /// e.g. an absent root or a payload whose `Display` fails.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A child link or sibling ring that does not close, or a dangling index.
    #[error("malformed structure: {0}")]
    MalformedStructure(String),
}

impl RenderError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        RenderError::InvalidArgument(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        RenderError::MalformedStructure(msg.into())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
