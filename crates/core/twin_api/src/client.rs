//! The transport seam.
//!
//! The core neither connects, retries nor dispatches: a [`Client`]
//! implementation (MQTT, AMQP, WebSocket, ...) owns all of that. The
//! contract is deliberately small:
//!
//! - `connect`/`disconnect` are blocking lifecycle calls; callers own their
//!   invocation context.
//! - `send`/`reply` are fire-to-transport dispatch; ordering is
//!   transport-defined.
//! - each subscribed handler observes envelopes in transport-delivered
//!   order; ordering across handlers is unspecified. Handlers must not
//!   reenter `subscribe`/`unsubscribe` unless the implementation locks for
//!   it.

use crate::envelope::Envelope;
use std::sync::Arc;

/// An envelope callback: `(request_id, envelope)`.
pub type Handler = Arc<dyn Fn(&str, &Envelope) + Send + Sync>;

pub trait Client {
    fn connect(&mut self) -> Result<(), TransportError>;

    fn disconnect(&mut self);

    fn send(&self, message: &Envelope) -> Result<(), TransportError>;

    fn reply(&self, request_id: &str, message: &Envelope) -> Result<(), TransportError>;

    fn subscribe(&mut self, handler: Handler);

    /// Remove a previously subscribed handler, compared by identity
    /// (`Arc::ptr_eq`).
    fn unsubscribe(&mut self, handler: &Handler);
}

/// An opaque transport failure. The cause, when present, belongs to the
/// transport implementation.
#[derive(Debug, thiserror::Error)]
#[error("Transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TransportError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::topic::EntityType;
    use crate::topic::Topic;
    use crate::topic::TopicCriterion;
    use std::sync::Mutex;

    /// A loopback client: `send` feeds the subscribed handlers directly.
    #[derive(Default)]
    struct LoopbackClient {
        connected: bool,
        handlers: Vec<Handler>,
        sent: Mutex<Vec<Envelope>>,
    }

    impl Client for LoopbackClient {
        fn connect(&mut self) -> Result<(), TransportError> {
            self.connected = true;
            Ok(())
        }

        fn disconnect(&mut self) {
            self.connected = false;
        }

        fn send(&self, message: &Envelope) -> Result<(), TransportError> {
            if !self.connected {
                return Err(TransportError::new("not connected"));
            }
            self.sent.lock().unwrap().push(message.clone());
            for handler in &self.handlers {
                handler("r1", message);
            }
            Ok(())
        }

        fn reply(&self, _request_id: &str, message: &Envelope) -> Result<(), TransportError> {
            self.send(message)
        }

        fn subscribe(&mut self, handler: Handler) {
            self.handlers.push(handler);
        }

        fn unsubscribe(&mut self, handler: &Handler) {
            self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
        }
    }

    fn envelope() -> Envelope {
        Envelope::new(
            Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events),
            Path::thing("t1"),
        )
    }

    #[test]
    fn handlers_observe_sent_envelopes() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let seen_by_handler = seen.clone();

        let mut client = LoopbackClient::default();
        client.connect().unwrap();
        client.subscribe(Arc::new(move |request_id, envelope| {
            seen_by_handler
                .lock()
                .unwrap()
                .push(format!("{request_id}:{}", envelope.path));
        }));

        client.send(&envelope()).unwrap();
        assert_eq!(seen.lock().unwrap().as_slice(), ["r1:@things/t1"]);
        assert_eq!(client.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribe_removes_by_identity() {
        let mut client = LoopbackClient::default();
        client.connect().unwrap();

        let handler: Handler = Arc::new(|_, _| {});
        client.subscribe(handler.clone());
        assert_eq!(client.handlers.len(), 1);

        client.unsubscribe(&handler);
        assert!(client.handlers.is_empty());
    }

    #[test]
    fn send_fails_when_disconnected() {
        let client = LoopbackClient::default();
        assert!(client.send(&envelope()).is_err());
    }
}
