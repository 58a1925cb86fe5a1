/// Errors that can occur while building or parsing a device identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    /// Raw identifier bytes must be exactly 16 bytes long.
    #[error("invalid identifier length ({0} bytes, expected 16)")]
    InvalidLength(usize),

    /// The text is not a hyphenated 8-4-4-4-12 hex identifier.
    #[error("invalid identifier text {0:?}")]
    InvalidText(String),
}

pub type Result<T> = std::result::Result<T, IdentError>;
