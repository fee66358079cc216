//! Messaging infrastructure

pub mod router;

pub use router::MessageRouter;
