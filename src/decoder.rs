use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::prelude::*;
use futures_lite::ready;
use pin_project_lite::pin_project;

use crate::assembler::{Assembler, Handler, IdPolicy};
use crate::{DataStream, LineSplitter, Message};

/// Decode a stream of byte chunks into a stream of SSE messages.
///
/// # Examples
///
/// ```
/// use futures_lite::{future, stream, StreamExt};
/// use std::io;
///
/// let chunks = stream::iter(vec![Ok::<_, io::Error>("event: greet\ndata: hi\n\n")]);
/// let mut messages = sse_data_stream::decode(chunks);
/// let message = future::block_on(messages.next()).unwrap().unwrap();
/// assert_eq!(message.event(), "greet");
/// assert_eq!(message.data(), "hi");
/// ```
pub fn decode<S, B>(stream: S) -> Decoder<S>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    Decoder {
        stream,
        lines: LineSplitter::new(),
        assembler: Assembler::new(),
        outbox: Outbox::default(),
        done: false,
        truncated: false,
    }
}

pin_project! {
    /// A stream of SSE messages decoded from a stream of byte chunks.
    ///
    /// The upstream stream is only polled once every message decoded from
    /// earlier chunks has been taken.
    #[derive(Debug)]
    pub struct Decoder<S> {
        #[pin]
        stream: S,
        lines: LineSplitter,
        assembler: Assembler,
        outbox: Outbox,
        done: bool,
        truncated: bool,
    }
}

impl<S> Decoder<S> {
    /// Set what happens to the id between messages.
    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.assembler.set_id_policy(policy);
        self
    }

    /// The value of the last `id` field read, empty if none.
    ///
    /// This is the value to send as `Last-Event-ID` when reconnecting.
    pub fn last_event_id(&self) -> &str {
        &self.outbox.last_event_id
    }

    /// The last valid reconnection time read, in milliseconds.
    pub fn retry(&self) -> Option<u64> {
        self.outbox.retry
    }

    /// Whether the stream ended in the middle of a message.
    ///
    /// The unfinished message is never yielded.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Route the decoded messages into a stream of data payloads.
    pub fn into_data_stream<F>(self, on_metadata: Option<F>) -> DataStream<S, F>
    where
        F: FnMut(Message),
    {
        DataStream::new(self, on_metadata)
    }
}

impl<S, B> Stream for Decoder<S>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    type Item = io::Result<Message>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(message) = this.outbox.queue.pop_front() {
                return Poll::Ready(Some(Ok(message)));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => {
                    let chunk = chunk.as_ref();
                    log::trace!("< Received a chunk with len {}", chunk.len());
                    let assembler = &mut *this.assembler;
                    let outbox = &mut *this.outbox;
                    this.lines
                        .feed(chunk, |line, colon| assembler.feed(line, colon, &mut *outbox));
                }
                Some(Err(err)) => {
                    log::trace!("< Upstream failed: {}", err);
                    *this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    *this.done = true;
                    if this.lines.has_partial() || this.assembler.has_pending() {
                        log::debug!("< Stream ended mid-message, discarding it");
                        *this.truncated = true;
                    }
                }
            }
        }
    }
}

/// Collects dispatched messages until they are polled.
#[derive(Debug, Default)]
struct Outbox {
    queue: VecDeque<Message>,
    last_event_id: String,
    retry: Option<u64>,
}

impl Handler for Outbox {
    fn on_message(&mut self, message: Message) {
        log::trace!("< Dispatched message with event {:?}", message.event());
        self.queue.push_back(message);
    }

    fn on_id(&mut self, id: &str) {
        self.last_event_id.clear();
        self.last_event_id.push_str(id);
    }

    fn on_retry(&mut self, retry: u64) {
        self.retry = Some(retry);
    }
}
