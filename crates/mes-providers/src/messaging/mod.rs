//! Message Adapter Implementations
//!
//! | Adapter | Registry name | Description |
//! |---------|---------------|-------------|
//! | [`InternalBus`] | `internal` | In-process synchronous pub/sub (default) |
//! | [`NullMessageAdapter`] | `null` | Drops every message |
//!
//! External brokers plug in by implementing
//! [`MessageAdapter`](mes_domain::ports::providers::MessageAdapter) and
//! registering under a new name.

pub mod internal;
pub mod null;

pub use internal::InternalBus;
pub use null::NullMessageAdapter;
