use thiserror::Error;

/// Errors that can occur when describing shapes or draining an allocation queue.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The caller attempted to describe a shape that cannot be planned.
    ///
    /// Shapes are validated when they are constructed, so an invalid shape never reaches
    /// the distribution calculator.
    #[error("invalid shape (byte size {byte_size}, weight {weight}): {problem}")]
    InvalidShape {
        /// The byte size of the rejected shape, or 0 if it could not be computed.
        byte_size: u64,

        /// The weight of the rejected shape.
        weight: u32,

        /// A human-readable description of the problem.
        problem: &'static str,
    },

    /// An emission was requested from an allocation queue that has no emissions remaining.
    #[error("the allocation queue is empty")]
    EmptyQueue,
}

impl Error {
    pub(crate) fn invalid_shape(byte_size: u64, weight: u32, problem: &'static str) -> Self {
        Self::InvalidShape {
            byte_size,
            weight,
            problem,
        }
    }
}

/// A specialized `Result` type for prefill planning operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
