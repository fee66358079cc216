//! Error-translating boundary
//!
//! The single place where working [`Error`]s become the closed
//! [`DomainError`] taxonomy. Business errors cross unchanged; everything else
//! becomes `UNHANDLED` with the original message and variant name attached.

use crate::constants::EXECUTION_LOG_TARGET;
use mes_domain::error::{DomainError, Error, Result, UNHANDLED_ERROR_CODE};
use tracing::error;

/// Run `f` and normalize its error
///
/// Every error crossing the boundary is logged at error level with its code:
/// business errors as `Domain error`, the rest as `Unhandled error` with the
/// original variant name.
///
/// # Example
///
/// ```
/// use mes_domain::error::{DomainError, Error};
/// use mes_infrastructure::execution::guarded;
///
/// let err = guarded::<()>("lookup", || Err(Error::not_found("lot L-9"))).unwrap_err();
/// assert_eq!(err.code, "UNHANDLED");
/// assert_eq!(err.data["type"], "NotFound");
///
/// let err = guarded::<()>("validate", || Err(DomainError::validation("qty < 0").into())).unwrap_err();
/// assert_eq!(err.code, "MES_ERROR");
/// ```
pub fn guarded<T>(name: &str, f: impl FnOnce() -> Result<T>) -> std::result::Result<T, DomainError> {
    f().map_err(|e| {
        if e.is_domain() {
            let domain = e.into_domain();
            error!(
                target: EXECUTION_LOG_TARGET,
                function = name,
                code = %domain.code,
                kind = %domain.kind,
                error = %domain.message,
                "Domain error"
            );
            domain
        } else {
            error!(
                target: EXECUTION_LOG_TARGET,
                function = name,
                code = UNHANDLED_ERROR_CODE,
                error_type = e.kind_name(),
                error = %e,
                "Unhandled error"
            );
            e.into_domain()
        }
    })
}
