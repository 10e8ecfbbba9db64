//! Errors specific to the ChatAI service.

use crate::clients::{ApiError, ErrorCode};

/// Maximum number of characters accepted in a question.
pub const MAX_INPUT_LENGTH: usize = 200;

/// The question exceeds [`MAX_INPUT_LENGTH`] characters. Try a smaller input.
pub const INPUT_SIZE_EXCEEDED: ErrorCode = ErrorCode::Service("INPUT_SIZE_EXCEEDED");

/// Builds the error returned for oversized questions.
#[must_use]
pub fn input_size_exceeded() -> ApiError {
    ApiError::new(
        INPUT_SIZE_EXCEEDED,
        format!("input size exceeded the limit of {MAX_INPUT_LENGTH} characters"),
    )
}
