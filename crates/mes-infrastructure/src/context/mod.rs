//! Thread-bound execution context
//!
//! | Context | Guard | Read |
//! |---------|-------|------|
//! | Correlation id | [`CorrelationScope`] | [`current_correlation_id`] |
//! | Session (tenant/site/user) | [`SessionScope`] | [`current_session`] |
//! | Transaction manager | [`TransactionManagerScope`] | [`current_transaction_manager`] |
//!
//! All context is per thread. Guards are `!Send` and restore the previous
//! value when dropped, including during unwinding.

pub mod correlation;
pub mod session;

pub use correlation::{CorrelationScope, current_correlation_id, make_envelope, with_correlation};
pub use session::{
    SessionContext, SessionScope, TransactionManagerScope, current_session,
    current_transaction_manager, default_transaction_manager, set_transaction_manager,
};
