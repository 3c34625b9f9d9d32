//! Conversions into [`AppError`]

use std::num::ParseIntError;

use super::app_error::AppError;

impl From<ParseIntError> for AppError {
    fn from(err: ParseIntError) -> Self {
        AppError::validation(format!("Not a whole number: {err}")).caused_by(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_parse_int_is_validation() {
        let err: AppError = "twelve".parse::<u64>().unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().starts_with("Not a whole number"));
    }
}
