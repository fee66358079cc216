//! # MES Adapter Runtime
//!
//! Pluggable adapter layer for a plant-floor application: swappable cache
//! providers, a pub/sub router over named message adapters, thread-bound
//! correlation and transaction context, and guarded/traced execution.
//!
//! ## Example
//!
//! ```
//! use mes::prelude::*;
//! use serde_json::json;
//!
//! let runtime = AdapterRuntime::new();
//! runtime.cache().set("energy", "baseline:WO-1", json!({"expected_kwh": 50.0}), None)?;
//!
//! let baseline = Execution::named("load_baseline")
//!     .traced()
//!     .run_guarded(|| Ok(runtime.cache().get("energy", "baseline:WO-1")?))?;
//! assert!(baseline.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Ports, errors, catalogs and value objects
//! - `providers` - In-memory cache, internal bus, null and no-op implementations
//! - `infrastructure` - Registries, context, execution wrappers, config, logging

use std::path::Path;

/// Domain layer - ports, errors and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mes_domain::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use mes_providers::*;
}

/// Infrastructure layer - registries, context, wrappers, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use mes_infrastructure::*;
}

/// Types most applications need
pub mod prelude {
    pub use mes_domain::error::{DomainError, DomainErrorKind, Error, Result};
    pub use mes_domain::ports::providers::{CacheProvider, MessageAdapter, MessageHandler};
    pub use mes_domain::ports::{TransactionHandle, TransactionManager};
    pub use mes_domain::value_objects::MessageEnvelope;
    pub use mes_infrastructure::context::{
        SessionContext, SessionScope, current_correlation_id, make_envelope, set_transaction_manager,
        with_correlation,
    };
    pub use mes_infrastructure::execution::{Execution, guarded, traced};
    pub use mes_infrastructure::transaction::transactional;
    pub use mes_infrastructure::{AdapterRuntime, CacheRegistry, MessageRouter};
}

// Re-export commonly used domain types at the crate root
pub use domain::{DomainError, Error, Result};
pub use infrastructure::{AdapterRuntime, AppConfig};

/// Load configuration, from `path` when given
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => infrastructure::ConfigLoader::new().with_config_path(path),
        None => infrastructure::ConfigLoader::new(),
    };
    loader.load()
}

/// Load configuration and wire a runtime from it
pub fn bootstrap(path: Option<&Path>) -> Result<(AppConfig, AdapterRuntime)> {
    let config = load_config(path)?;
    let runtime = AdapterRuntime::from_config(&config)?;
    Ok((config, runtime))
}
