//! Result type alias for malxport
//!
//! This module provides a convenient Result type alias that uses MalxportError
//! as the error type.

use super::errors::MalxportError;

/// Result type alias for malxport operations
///
/// # Examples
///
/// ```
/// use malxport::domain::result::Result;
/// use malxport::domain::errors::MalxportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MalxportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MalxportError>;

/// Result type for the batch compiler, which only fails with [`CompileError`]
///
/// [`CompileError`]: super::errors::CompileError
pub type CompileResult<T> = std::result::Result<T, super::errors::CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CompileError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> CompileResult<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_compile_result_lifts_into_result() {
        fn inner() -> Result<()> {
            let failing: CompileResult<()> = Err(CompileError::EmptyBatch);
            failing?;
            Ok(())
        }

        assert!(inner().is_err());
    }
}
