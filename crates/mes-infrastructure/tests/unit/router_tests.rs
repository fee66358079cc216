//! Tests for the message router

use crate::test_utils::{RecordingAdapter, counting_handler};
use mes_domain::error::Error;
use mes_domain::registry::MessageAdapterConfig;
use mes_domain::value_objects::MessageEnvelope;
use mes_infrastructure::messaging::MessageRouter;
use mes_providers::messaging::InternalBus;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_internal_bus_active_from_construction() {
    let router = MessageRouter::new();
    assert_eq!(router.active_adapter_name().as_deref(), Some("internal"));
    assert_eq!(router.adapter_names(), vec!["internal"]);
}

#[test]
fn test_publish_reaches_internal_subscribers() {
    let router = MessageRouter::new();
    let (handler, received) = counting_handler("stock");
    router.subscribe("mes.material.received", handler).unwrap();

    router
        .publish("mes.material.received", &json!({"lot": "L-1"}))
        .unwrap();

    assert_eq!(*received.lock().unwrap(), vec![json!({"lot": "L-1"})]);
}

#[test]
fn test_register_without_activation_keeps_active() {
    let router = MessageRouter::new();
    router
        .register_adapter("kafka", RecordingAdapter::new("kafka"), false)
        .unwrap();

    assert_eq!(router.active_adapter_name().as_deref(), Some("internal"));
    assert_eq!(router.adapter_names(), vec!["internal", "kafka"]);
}

#[test]
fn test_first_registration_on_empty_router_activates() {
    let router = MessageRouter::empty();
    router
        .register_adapter("kafka", RecordingAdapter::new("kafka"), false)
        .unwrap();
    assert_eq!(router.active_adapter_name().as_deref(), Some("kafka"));
}

#[test]
fn test_register_rejects_blank_name() {
    let router = MessageRouter::new();
    let err = router
        .register_adapter("  ", RecordingAdapter::new("kafka"), true)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(router.active_adapter_name().as_deref(), Some("internal"));
}

#[test]
fn test_unknown_adapter_leaves_active_unchanged() {
    let router = MessageRouter::new();
    let err = router.use_adapter("mqtt").unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("mqtt"));
    assert_eq!(router.active_adapter_name().as_deref(), Some("internal"));

    // Still routable through the original adapter
    let (handler, received) = counting_handler("h");
    router.subscribe("t", handler).unwrap();
    router.publish("t", &json!(1)).unwrap();
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[test]
fn test_empty_router_has_no_active_adapter() {
    let router = MessageRouter::empty();
    let err = router.publish("t", &json!(1)).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(router.active_adapter().is_err());
}

#[test]
fn test_empty_topic_is_routed_like_any_other() {
    let router = MessageRouter::new();
    router.publish("", &json!(0)).unwrap();

    let (handler, received) = counting_handler("h");
    router.subscribe("", handler).unwrap();
    router.publish("", &json!(1)).unwrap();
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[test]
fn test_padded_adapter_name_resolves_everywhere() {
    let router = MessageRouter::new();
    let kafka = RecordingAdapter::new("kafka");
    router.register_adapter(" kafka ", kafka.clone(), false).unwrap();

    assert_eq!(router.adapter_names(), vec!["internal", "kafka"]);
    assert!(router.adapter(" kafka ").is_some());

    router.use_adapter(" kafka ").unwrap();
    assert_eq!(router.active_adapter_name().as_deref(), Some("kafka"));

    router.publish("t", &json!(1)).unwrap();
    assert_eq!(kafka.published().len(), 1);
}

#[test]
fn test_adapter_lookup_by_name() {
    let router = MessageRouter::new();
    let kafka = RecordingAdapter::new("kafka");
    router.register_adapter("kafka", kafka.clone(), false).unwrap();

    let direct = router.adapter("kafka").unwrap();
    direct.publish("direct.topic", &json!(7)).unwrap();

    assert_eq!(kafka.published(), vec![("direct.topic".to_string(), json!(7))]);
    assert!(router.adapter("mqtt").is_none());
}

#[test]
fn test_register_named_from_catalog() {
    let router = MessageRouter::new();
    router
        .register_named(&MessageAdapterConfig::new("null"), true)
        .unwrap();
    assert_eq!(router.active_adapter_name().as_deref(), Some("null"));

    let err = router
        .register_named(&MessageAdapterConfig::new("amqp"), true)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(router.active_adapter_name().as_deref(), Some("null"));
}

#[test]
fn test_publish_envelope_serializes_camel_case() {
    let router = MessageRouter::new();
    let (handler, received) = counting_handler("audit");
    router.subscribe("mes.audit", handler).unwrap();

    let envelope = MessageEnvelope::new("receive", "material", json!({"qty": 5}))
        .with_correlation_id("req-9");
    router.publish_envelope("mes.audit", &envelope).unwrap();

    let delivered = received.lock().unwrap()[0].clone();
    assert_eq!(delivered["correlationId"], "req-9");
    assert_eq!(delivered["verb"], "receive");
    assert_eq!(MessageEnvelope::from_value(&delivered).unwrap(), envelope);
}

#[test]
fn test_switching_adapters_end_to_end() {
    let router = MessageRouter::new();
    let kafka = RecordingAdapter::new("kafka");
    router.register_adapter("kafka", kafka.clone(), false).unwrap();

    let (handler, received) = counting_handler("internal_only");
    router.subscribe("mes.wo.released", handler).unwrap();

    router
        .publish("mes.wo.released", &json!({"wo": "WO-1"}))
        .unwrap();
    router.use_adapter("kafka").unwrap();
    router
        .publish("mes.wo.released", &json!({"wo": "WO-2"}))
        .unwrap();

    assert_eq!(*received.lock().unwrap(), vec![json!({"wo": "WO-1"})]);
    assert_eq!(
        kafka.published(),
        vec![("mes.wo.released".to_string(), json!({"wo": "WO-2"}))]
    );
}

#[test]
fn test_replacing_adapter_under_same_name() {
    let router = MessageRouter::new();
    let replacement = Arc::new(InternalBus::new());
    router
        .register_adapter("internal", replacement.clone(), false)
        .unwrap();

    let (handler, _) = counting_handler("h");
    router.subscribe("t", handler).unwrap();
    assert_eq!(replacement.subscriber_count("t"), 1);
}
