//! Transaction manager implementations

pub mod noop;

pub use noop::NoopTransactionManager;
