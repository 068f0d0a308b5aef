use std::error::Error;
use std::fmt;
use std::io;

/// An `error` event received from the server.
///
/// [`DataStream`](crate::DataStream) yields it wrapped in an [`io::Error`] of
/// kind [`io::ErrorKind::Other`]; the description is the event's data.
///
/// # Examples
///
/// ```
/// use sse_data_stream::EventError;
/// use std::io;
///
/// let err: io::Error = EventError::new("Something went wrong").into();
/// assert_eq!(err.to_string(), "Something went wrong");
/// assert!(EventError::from_io(&err).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventError {
    description: String,
}

impl EventError {
    /// Create a new event error.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The data of the `error` event.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Find the `EventError` inside an `io::Error`, if it carries one.
    pub fn from_io(err: &io::Error) -> Option<&EventError> {
        err.get_ref().and_then(|inner| inner.downcast_ref())
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl Error for EventError {}

impl From<EventError> for io::Error {
    fn from(err: EventError) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}
