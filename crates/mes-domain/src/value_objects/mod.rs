//! Value objects shared by every layer

pub mod envelope;
pub mod ids;

pub use envelope::{MessageEnvelope, utc_now_iso};
pub use ids::{CORRELATION_ID_PREFIX, new_id};
