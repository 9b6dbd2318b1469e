use chrono::Local;
use std::fmt::Write as _;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;

use crate::tui::UILogEntry;

// Collects the message and any structured fields of one event.
struct LogEntryVisitor {
    message: Option<String>,
    fields: String,
}

impl LogEntryVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: String::new(),
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }

    fn into_message(self) -> Option<String> {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => Some(message),
            (Some(message), false) => Some(format!("{} {}", message, self.fields)),
            (None, false) => Some(self.fields),
            (None, true) => None,
        }
    }
}

impl Visit for LogEntryVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }
}

/// Forwards tracing events to the Logs view.
pub struct TuiLogCollectorLayer {
    sender: mpsc::UnboundedSender<UILogEntry>,
}

impl TuiLogCollectorLayer {
    pub fn new(sender: mpsc::UnboundedSender<UILogEntry>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogCollectorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LogEntryVisitor::new();
        event.record(&mut visitor);

        let Some(message) = visitor.into_message() else {
            return;
        };
        let entry = UILogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message,
        };
        // The receiver goes away when the TUI exits; late events are dropped.
        let _ = self.sender.send(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn events_reach_the_channel_with_fields() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber = tracing_subscriber::registry().with(TuiLogCollectorLayer::new(tx));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(count = 3, "Filter rejected");
        });
        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, Level::WARN);
        assert_eq!(entry.message, "Filter rejected count=3");
        assert!(rx.try_recv().is_err());
    }
}
