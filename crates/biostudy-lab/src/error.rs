use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    #[error("sequence is empty")]
    Empty,

    /// Character other than A, C, G, T or N. `position` is 1-based over the
    /// sequence with whitespace removed.
    #[error("invalid base '{base}' at position {position}")]
    InvalidBase { base: char, position: usize },
}

pub type Result<T> = std::result::Result<T, LabError>;
