//! Error type shared by the ranking, unranking and successor routines.

use thiserror::Error;

/// Result type for combinatorial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the combinatorial routines.
///
/// Every variant signals a programming error in the caller: the routines are
/// pure, so retrying with the same arguments always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The object handed in is not a member of the family it claims to be
    /// (a non-permutation, a subset that is not strictly increasing, `k > n`, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An unrank request outside `1..=max`.
    #[error("rank {rank} is outside the valid range 1..={max}")]
    RankOutOfRange { rank: u64, max: u64 },

    /// A count or rank does not fit in a `u64`.
    #[error("integer overflow while computing {0}")]
    Overflow(&'static str),

    /// A generator state was modified between calls.
    #[error("generator state is inconsistent: {0}")]
    InvalidState(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Shorthand for [`Error::InvalidState`].
    pub fn state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }
}
