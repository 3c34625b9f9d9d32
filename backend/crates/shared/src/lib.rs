//! Shared Kernel
//!
//! Error vocabulary shared by the auth library and the console binary:
//! an [`error::kind::ErrorKind`] classification with process exit codes and
//! the [`error::app_error::AppError`] value that carries it.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
