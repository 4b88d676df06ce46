/// Errors returned by checked element access and by runtime-validated construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// One index of a multi-index is outside of its axis.
    #[error("index ({index}) out of bounds [0-{}] on axis {axis}", .length - 1)]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        length: usize,
    },

    /// A flat index is outside of the underlying buffer.
    #[error("index ({index}) out of bounds [0-{}]", .size - 1)]
    FlatIndexOutOfBounds { index: usize, size: usize },

    /// The number of supplied elements does not match the size of the array.
    #[error("expected {expected} elements, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// An iterator yielded more elements than the array holds.
    #[error("expected {expected} elements, got more")]
    TooManyElements { expected: usize },
}

/// Convenience alias for `Result<T, ArrayError>`.
pub type Result<T, E = ArrayError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ArrayError::IndexOutOfBounds {
            axis: 1,
            index: 5,
            length: 4,
        };
        assert_eq!(err.to_string(), "index (5) out of bounds [0-3] on axis 1");

        let err = ArrayError::FlatIndexOutOfBounds { index: 9, size: 6 };
        assert_eq!(err.to_string(), "index (9) out of bounds [0-5]");

        let err = ArrayError::LengthMismatch {
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "expected 4 elements, got 3");

        let err = ArrayError::TooManyElements { expected: 4 };
        assert_eq!(err.to_string(), "expected 4 elements, got more");
    }
}
