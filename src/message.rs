use std::time::Duration;

/// An SSE message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Message {
    /// The ID of this event.
    ///
    /// See also the [Server-Sent Events spec](https://html.spec.whatwg.org/multipage/server-sent-events.html#concept-event-stream-last-event-id).
    pub(crate) id: String,
    /// The event type. Empty if no event name was provided.
    pub(crate) event: String,
    /// The data for this event, one line per `data` field.
    pub(crate) data: String,
    /// The reconnection time in milliseconds.
    pub(crate) retry: Option<u64>,
}

impl Message {
    /// Get the message id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the message event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Access the event data.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Get the reconnection time in milliseconds, if one was sent.
    pub fn retry(&self) -> Option<u64> {
        self.retry
    }

    /// Get the reconnection time as a `Duration`.
    pub fn retry_duration(&self) -> Option<Duration> {
        self.retry.map(Duration::from_millis)
    }

    /// Take the event data out of the message.
    pub fn into_data(self) -> String {
        self.data
    }
}
