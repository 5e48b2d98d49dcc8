use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("index {index} out of range for function of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("function has no points")]
    Empty,

    #[error("function needs at least {required} points, has {actual}")]
    TooFewPoints { required: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let error = FunctionError::IndexOutOfRange { index: 4, size: 3 };
        assert_eq!(error.to_string(), "index 4 out of range for function of size 3");
    }

    #[test]
    fn test_too_few_points_message() {
        let error = FunctionError::TooFewPoints { required: 2, actual: 1 };
        assert_eq!(error.to_string(), "function needs at least 2 points, has 1");
    }
}
