//! Form definitions backing the browse routes.

use thiserror::Error;

pub mod order_plans;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("unsupported page size")]
    InvalidPageSize,
}
