//! Traced execution
//!
//! Brackets an operation with structured log events:
//!
//! | Event | Level | Fields |
//! |-------|-------|--------|
//! | `start` | debug | `function` |
//! | `ok` | info | `function`, `elapsed_ms` |
//! | `fail` | error | `function`, `elapsed_ms`, `error`, `error_type` |
//!
//! Each event carries the operation's correlation id. Results and errors are
//! returned untouched.

use crate::constants::EXECUTION_LOG_TARGET;
use crate::context::CorrelationScope;
use crate::utils::TimedOperation;
use mes_domain::error::Result;
use tracing::{debug, error, info, info_span};

/// Run `f` with start/outcome logging under the current correlation id
///
/// A correlation id is established for the call if none is active, so every
/// event and any nested traced call share one id.
pub fn traced<T>(name: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    traced_with_correlation(name, None, f)
}

/// [`traced`] with an explicit correlation id
pub fn traced_with_correlation<T>(
    name: &str,
    correlation_id: Option<&str>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let scope = CorrelationScope::enter(correlation_id);
    let span = info_span!(target: EXECUTION_LOG_TARGET, "execution", function = name, correlation_id = scope.id());
    let _entered = span.enter();

    debug!(target: EXECUTION_LOG_TARGET, function = name, "start");
    let timer = TimedOperation::start();
    match f() {
        Ok(value) => {
            info!(target: EXECUTION_LOG_TARGET, function = name, elapsed_ms = timer.elapsed_ms(), "ok");
            Ok(value)
        }
        Err(e) => {
            error!(
                target: EXECUTION_LOG_TARGET,
                function = name,
                elapsed_ms = timer.elapsed_ms(),
                error = %e,
                error_type = e.kind_name(),
                "fail"
            );
            Err(e)
        }
    }
}
