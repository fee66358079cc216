//! Tests for the structured log layer

use crate::test_utils::capture_logs;
use mes_infrastructure::context::{SessionContext, SessionScope, with_correlation};
use mes_infrastructure::logging::{LogSink, MemoryLogSink, StructuredLogLayer};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn test_record_carries_typed_fields() {
    let (_, sink) = capture_logs(|| {
        tracing::info!(
            target: "mes::energy",
            station = "ST-4",
            kwh = 12.5,
            count = 3u64,
            delta = -2i64,
            ok = true,
            "Reading stored"
        );
    });

    let record = sink.with_message("Reading stored").pop().unwrap();
    assert_eq!(record.level, "INFO");
    assert_eq!(record.logger, "mes::energy");
    assert_eq!(record.field("station"), Some(&json!("ST-4")));
    assert_eq!(record.field("kwh"), Some(&json!(12.5)));
    assert_eq!(record.field("count"), Some(&json!(3)));
    assert_eq!(record.field("delta"), Some(&json!(-2)));
    assert_eq!(record.field("ok"), Some(&json!(true)));
    assert!(record.ts > 0);
}

#[test]
fn test_record_carries_correlation_and_session() {
    let (_, sink) = capture_logs(|| {
        let _session = SessionScope::enter(SessionContext::new("acme", "plant-1", "ana"));
        with_correlation(Some("req-3"), || tracing::warn!("Inside"));
        tracing::warn!("Outside");
    });

    let inside = sink.with_message("Inside").pop().unwrap();
    assert_eq!(inside.correlation_id.as_deref(), Some("req-3"));
    assert_eq!(inside.tenant.as_deref(), Some("acme"));
    assert_eq!(inside.site.as_deref(), Some("plant-1"));
    assert_eq!(inside.user.as_deref(), Some("ana"));

    let outside = sink.with_message("Outside").pop().unwrap();
    assert_eq!(outside.correlation_id, None);
    assert_eq!(outside.tenant.as_deref(), Some("acme"));
}

#[test]
fn test_json_shape() {
    let (_, sink) = capture_logs(|| {
        with_correlation(Some("req-8"), || tracing::info!(topic = "mes.wo", "Published"));
    });

    let record = sink.with_message("Published").pop().unwrap();
    let rendered: Value = serde_json::from_str(&record.to_json()).unwrap();

    assert_eq!(rendered["correlationId"], "req-8");
    assert_eq!(rendered["message"], "Published");
    assert_eq!(rendered["level"], "INFO");
    assert_eq!(rendered["topic"], "mes.wo");
    assert!(rendered["ts"].is_i64());
    assert!(rendered.get("tenant").is_none());
}

#[test]
fn test_json_shape_keeps_null_correlation() {
    let (_, sink) = capture_logs(|| tracing::info!("Detached"));

    let record = sink.with_message("Detached").pop().unwrap();
    let rendered: Value = serde_json::from_str(&record.to_json()).unwrap();
    assert_eq!(rendered["correlationId"], Value::Null);
}

#[test]
fn test_min_level_filters_events() {
    let sink = Arc::new(MemoryLogSink::new(10));
    let layer_sink: Arc<dyn LogSink> = sink.clone();
    let subscriber =
        Registry::default().with(StructuredLogLayer::with_min_level(layer_sink, Level::WARN));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Chatty");
        tracing::error!("Important");
    });

    let messages: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
    assert_eq!(messages, vec!["Important"]);
}
