use std::collections::VecDeque;
use std::mem;

use crate::field::{classify, Field};
use crate::Message;

/// Receives what the [`Assembler`] produces.
pub trait Handler {
    /// A blank line completed a message.
    fn on_message(&mut self, message: Message);

    /// An `id` field was read. Called for empty ids too.
    fn on_id(&mut self, _id: &str) {}

    /// A valid `retry` field was read.
    fn on_retry(&mut self, _retry: u64) {}
}

impl Handler for Vec<Message> {
    fn on_message(&mut self, message: Message) {
        self.push(message);
    }
}

impl Handler for VecDeque<Message> {
    fn on_message(&mut self, message: Message) {
        self.push_back(message);
    }
}

/// What happens to the message id when a message is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Every message starts with an empty id.
    Reset,
    /// The id carries over into the next message until a new `id` field.
    Retain,
}

impl Default for IdPolicy {
    fn default() -> Self {
        IdPolicy::Reset
    }
}

/// Accumulates fields into messages.
///
/// # Examples
///
/// ```
/// use sse_data_stream::Assembler;
///
/// let mut assembler = Assembler::new();
/// let mut out = vec![];
/// assembler.feed(b"data: hello", Some(4), &mut out);
/// assembler.feed(b"", None, &mut out);
/// assert_eq!(out[0].data(), "hello");
/// ```
#[derive(Debug, Default)]
pub struct Assembler {
    current: Message,
    policy: IdPolicy,
    pending: bool,
}

impl Assembler {
    /// Create a new assembler with the default [`IdPolicy`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new assembler with the given [`IdPolicy`].
    pub fn with_id_policy(policy: IdPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Set the [`IdPolicy`].
    pub fn set_id_policy(&mut self, policy: IdPolicy) {
        self.policy = policy;
    }

    /// Whether fields were read since the last dispatch.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Feed one line, as produced by [`LineSplitter`](crate::LineSplitter).
    pub fn feed<H>(&mut self, line: &[u8], colon: Option<usize>, handler: &mut H)
    where
        H: Handler + ?Sized,
    {
        match classify(line, colon) {
            Field::Blank => {
                let message = self.dispatch();
                handler.on_message(message);
                self.reset();
                return;
            }
            Field::Comment | Field::Unknown => return,
            Field::Id(id) => {
                self.current.id = id.into_owned();
                handler.on_id(&self.current.id);
            }
            Field::Event(event) => self.current.event = event.into_owned(),
            Field::Data(data) => {
                if !self.current.data.is_empty() {
                    self.current.data.push('\n');
                }
                self.current.data.push_str(&data);
            }
            Field::Retry(retry) => match parse_retry(&retry) {
                Some(retry) => {
                    self.current.retry = Some(retry);
                    handler.on_retry(retry);
                }
                None => log::debug!("< Ignoring invalid retry value {:?}", retry),
            },
        }
        self.pending = true;
    }

    /// Clear the fields of the message being assembled.
    ///
    /// The id is only cleared under [`IdPolicy::Reset`].
    pub fn reset(&mut self) {
        self.current.event.clear();
        self.current.data.clear();
        self.current.retry = None;
        if self.policy == IdPolicy::Reset {
            self.current.id.clear();
        }
        self.pending = false;
    }

    fn dispatch(&mut self) -> Message {
        let id = match self.policy {
            IdPolicy::Reset => mem::take(&mut self.current.id),
            IdPolicy::Retain => self.current.id.clone(),
        };
        Message {
            id,
            event: mem::take(&mut self.current.event),
            data: mem::take(&mut self.current.data),
            retry: self.current.retry,
        }
    }
}

/// Digits only: no sign, no whitespace.
fn parse_retry(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
