//! Bridge from `tracing` to fanlog.
//!
//! [`LogLayer`] turns every `tracing` event into a call on a [`Log`]:
//! `ERROR` events become errors, `WARN` events warnings, everything else
//! info. Events from fanlog's own crates are skipped so internal
//! diagnostics cannot loop back into the logger that produced them.

use fanlog_types::{Field, Log, LogError, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::field::Visit;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const INTERNAL_TARGET_PREFIX: &str = "fanlog_";

/// A tracing layer forwarding events to a [`Log`].
pub struct LogLayer {
    logger: Arc<dyn Log>,
}

impl LogLayer {
    /// Forward events to `logger`.
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for LogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(INTERNAL_TARGET_PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        match *metadata.level() {
            tracing::Level::ERROR => self.logger.error(&visitor.message, &visitor.fields),
            tracing::Level::WARN => self.logger.warn(&visitor.message, &visitor.fields),
            _ => self.logger.info(&visitor.message, &visitor.fields),
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &tracing::field::Field, value: Value) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.push(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push(field, Value::from(format!("{:?}", value)));
        }
    }
}

/// Install a global subscriber forwarding every `tracing` event to `logger`.
pub fn init_bridge(logger: Arc<dyn Log>) -> Result<()> {
    tracing_subscriber::registry()
        .with(LogLayer::new(logger))
        .try_init()
        .map_err(|e| LogError::Configuration(format!("Failed to install tracing bridge: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderConfig;
    use crate::logger::Logger;
    use crate::sink::Sink;
    use crate::test_support::MemoryBuffer;
    use fanlog_types::{Encoding, Level, MockLog};

    fn with_layer(logger: Arc<dyn Log>, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(LogLayer::new(logger));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_events_map_to_log_calls() {
        let mut mock = MockLog::new();
        mock.expect_info()
            .withf(|message, fields| {
                message == "signed in"
                    && fields.to_vec() == vec![Field::new("user", Value::from("ada"))]
            })
            .times(2)
            .return_const(());
        mock.expect_warn().times(1).return_const(());
        mock.expect_error().times(1).return_const(());

        with_layer(Arc::new(mock), || {
            tracing::info!(target: "app", user = "ada", "signed in");
            tracing::debug!(target: "app", user = "ada", "signed in");
            tracing::warn!(target: "app", "retrying");
            tracing::error!(target: "app", "gave up");
        });
    }

    #[test]
    fn test_internal_events_are_ignored() {
        let mut mock = MockLog::new();
        mock.expect_info().times(0);
        mock.expect_warn().times(0);

        with_layer(Arc::new(mock), || {
            tracing::info!(target: "fanlog_core::sink", "internal");
            tracing::warn!(target: "fanlog_core::router", "internal");
        });
    }

    #[test]
    fn test_bridge_writes_typed_fields() {
        let buffer = MemoryBuffer::new();
        let sink = Sink::memory(
            Encoding::Json,
            buffer.clone(),
            Level::Debug,
            EncoderConfig::plain(),
        );
        let logger = Arc::new(Logger::with_sink(sink, "memory", "bridge.log"));

        with_layer(logger.clone(), || {
            tracing::warn!(
                target: "app",
                attempt = 3,
                ratio = 0.5,
                cached = false,
                "slow response"
            );
        });

        assert_eq!(logger.warnings(), 1);
        let entry = &buffer.json_lines()[0];
        assert_eq!(entry["message"], "slow response");
        assert_eq!(entry["level"], "WARN");
        assert_eq!(entry["attempt"], 3);
        assert_eq!(entry["ratio"], 0.5);
        assert_eq!(entry["cached"], false);
    }
}
