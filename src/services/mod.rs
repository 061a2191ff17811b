use std::sync::Arc;

use thiserror::Error;

use crate::api::ApiError;

pub mod order_plans;

/// Errors surfaced by the browse services.
///
/// Upstream failures are shared behind an [`Arc`] because an in-flight detail
/// fetch can be awaited by several callers at once.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(Arc<ApiError>),

    /// The export was requested while no rows are loaded.
    #[error("nothing to export")]
    EmptyExport,

    /// The export workbook could not be built.
    #[error("spreadsheet build failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl ServiceError {
    /// True when the underlying cause is a missing upstream record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Api(err) if matches!(**err, ApiError::NotFound(_)))
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        ServiceError::Api(Arc::new(err))
    }
}

impl From<Arc<ApiError>> for ServiceError {
    fn from(err: Arc<ApiError>) -> Self {
        ServiceError::Api(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
