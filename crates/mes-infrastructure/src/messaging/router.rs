//! Message router
//!
//! Keeps every registered [`MessageAdapter`] by name and routes `publish` and
//! `subscribe` to the single active one. The in-process bus is registered
//! and active from construction, so publishing works before any wiring.
//! Topics are opaque strings: the router passes any topic, empty included,
//! straight to the adapter.
//!
//! Adapters are resolved under the router lock and called outside it; an
//! adapter may therefore publish back through the router.

use mes_domain::constants::INTERNAL_ADAPTER_NAME;
use mes_domain::error::{Error, Result};
use mes_domain::ports::providers::{MessageAdapter, MessageHandler};
use mes_domain::registry::{MessageAdapterConfig, resolve_message_adapter};
use mes_domain::value_objects::MessageEnvelope;
use mes_providers::messaging::InternalBus;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Default)]
struct RouterState {
    adapters: HashMap<String, Arc<dyn MessageAdapter>>,
    active: Option<String>,
}

/// Named adapter registry with one active adapter
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::MessageHandler;
/// use mes_infrastructure::messaging::MessageRouter;
/// use serde_json::json;
///
/// let router = MessageRouter::new();
/// assert_eq!(router.active_adapter_name().as_deref(), Some("internal"));
///
/// router
///     .subscribe("mes.wo.released", MessageHandler::named("print", |m| {
///         assert_eq!(m["wo"], "WO-1");
///         Ok(())
///     }))
///     .unwrap();
/// router.publish("mes.wo.released", &json!({"wo": "WO-1"})).unwrap();
/// ```
pub struct MessageRouter {
    state: RwLock<RouterState>,
}

impl MessageRouter {
    /// Create a router with the in-process bus registered and active
    pub fn new() -> Self {
        let router = Self::empty();
        {
            let mut state = router.write();
            state
                .adapters
                .insert(INTERNAL_ADAPTER_NAME.to_string(), Arc::new(InternalBus::new()));
            state.active = Some(INTERNAL_ADAPTER_NAME.to_string());
        }
        router
    }

    /// Create a router with no adapters
    pub fn empty() -> Self {
        Self {
            state: RwLock::new(RouterState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RouterState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RouterState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `adapter` under `name`
    ///
    /// Surrounding whitespace is not part of the name. Replaces any adapter already registered under that name. The adapter
    /// becomes active when `activate` is set or when nothing is active yet.
    pub fn register_adapter(
        &self,
        name: &str,
        adapter: Arc<dyn MessageAdapter>,
        activate: bool,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_argument("adapter name must not be empty"));
        }

        let activated = {
            let mut state = self.write();
            let replaced = state.adapters.insert(name.to_string(), adapter).is_some();
            if replaced {
                debug!(adapter = name, "Replaced registered adapter");
            }
            let activate = activate || state.active.is_none();
            if activate {
                state.active = Some(name.to_string());
            }
            activate
        };
        info!(adapter = name, active = activated, "Registered message adapter");
        Ok(())
    }

    /// Resolve an adapter from the catalog and register it
    pub fn register_named(&self, config: &MessageAdapterConfig, activate: bool) -> Result<()> {
        let adapter = resolve_message_adapter(config)?;
        self.register_adapter(&config.adapter, adapter, activate)
    }

    /// Make the adapter registered under `name` active
    ///
    /// Names are trimmed as in [`MessageRouter::register_adapter`]. Unknown
    /// names fail and leave the active adapter unchanged.
    pub fn use_adapter(&self, name: &str) -> Result<()> {
        let name = name.trim();
        {
            let mut state = self.write();
            if !state.adapters.contains_key(name) {
                let mut available: Vec<&str> = state.adapters.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(Error::not_found(format!(
                    "message adapter '{name}'. Registered adapters: {available:?}"
                )));
            }
            state.active = Some(name.to_string());
        }
        info!(adapter = name, "Using message adapter");
        Ok(())
    }

    /// The active adapter
    pub fn active_adapter(&self) -> Result<Arc<dyn MessageAdapter>> {
        let state = self.read();
        state
            .active
            .as_ref()
            .and_then(|name| state.adapters.get(name))
            .cloned()
            .ok_or_else(|| Error::configuration("no active message adapter"))
    }

    /// Name of the active adapter
    pub fn active_adapter_name(&self) -> Option<String> {
        self.read().active.clone()
    }

    /// Adapter registered under `name`, for direct addressing
    pub fn adapter(&self, name: &str) -> Option<Arc<dyn MessageAdapter>> {
        self.read().adapters.get(name.trim()).cloned()
    }

    /// Registered adapter names, sorted
    pub fn adapter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().adapters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Publish through the active adapter
    pub fn publish(&self, topic: &str, message: &Value) -> Result<()> {
        let adapter = self.active_adapter()?;
        debug!(topic, adapter = adapter.adapter_name(), "Routing message");
        adapter.publish(topic, message)
    }

    /// Publish an envelope through the active adapter
    pub fn publish_envelope(&self, topic: &str, envelope: &MessageEnvelope) -> Result<()> {
        self.publish(topic, &envelope.to_value()?)
    }

    /// Subscribe through the active adapter
    ///
    /// The subscription stays with the adapter active at call time; switching
    /// adapters later does not move it.
    pub fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<()> {
        let adapter = self.active_adapter()?;
        adapter.subscribe(topic, handler)
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("MessageRouter")
            .field("adapters", &state.adapters.len())
            .field("active", &state.active)
            .finish()
    }
}
