use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::prelude::*;
use futures_lite::ready;
use pin_project_lite::pin_project;

use crate::{decode, BlockingIter, Decoder, EventError, Message};

/// Decode a stream of byte chunks into a stream of event data.
///
/// Messages with the `error` event end the stream with an [`EventError`].
/// Messages with the `metadata` event are dropped; use
/// [`data_stream_with_metadata`] to receive them.
///
/// # Examples
///
/// ```
/// use futures_lite::{future, stream, StreamExt};
/// use std::io;
///
/// let chunks = stream::iter(vec![
///     Ok::<_, io::Error>("data: hel"),
///     Ok("lo\n\ndata: world\n\n"),
/// ]);
/// let data: Vec<String> = future::block_on(sse_data_stream::data_stream(chunks).try_collect()).unwrap();
/// assert_eq!(data, vec!["hello", "world"]);
/// ```
pub fn data_stream<S, B>(stream: S) -> DataStream<S, fn(Message)>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
{
    decode(stream).into_data_stream(None)
}

/// Decode a stream of byte chunks into a stream of event data, passing
/// `metadata` events to `on_metadata`.
///
/// `on_metadata` runs synchronously, in stream order, while the data stream
/// is being polled.
pub fn data_stream_with_metadata<S, B, F>(stream: S, on_metadata: F) -> DataStream<S, F>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
    F: FnMut(Message),
{
    decode(stream).into_data_stream(Some(on_metadata))
}

/// Create a metadata callback that forwards into a channel.
///
/// The callback never blocks. Once the receiver is dropped further metadata
/// is discarded.
///
/// # Examples
///
/// ```
/// use futures_lite::{future, stream, StreamExt};
/// use std::io;
///
/// let chunks = stream::iter(vec![Ok::<_, io::Error>("event: metadata\ndata: 50%\n\ndata: x\n\n")]);
/// let (on_metadata, metadata) = sse_data_stream::metadata_channel();
/// let stream = sse_data_stream::data_stream_with_metadata(chunks, on_metadata);
/// let data: Vec<String> = future::block_on(stream.try_collect()).unwrap();
/// assert_eq!(data, vec!["x"]);
/// assert_eq!(metadata.try_recv().unwrap().data(), "50%");
/// ```
pub fn metadata_channel() -> (
    impl FnMut(Message) + Send + 'static,
    async_channel::Receiver<Message>,
) {
    let (sender, receiver) = async_channel::unbounded();
    let on_metadata = move |message: Message| {
        if let Err(err) = sender.try_send(message) {
            log::debug!("> Metadata receiver is gone, dropping {:?}", err.into_inner());
        }
    };
    (on_metadata, receiver)
}

pin_project! {
    /// A stream of event data, created by [`data_stream`].
    pub struct DataStream<S, F> {
        #[pin]
        decoder: Decoder<S>,
        on_metadata: Option<F>,
        done: bool,
    }
}

impl<S, F> DataStream<S, F> {
    pub(crate) fn new(decoder: Decoder<S>, on_metadata: Option<F>) -> Self {
        Self {
            decoder,
            on_metadata,
            done: false,
        }
    }

    /// Access the underlying message decoder.
    pub fn decoder(&self) -> &Decoder<S> {
        &self.decoder
    }

    /// Consume the stream as a blocking iterator.
    pub fn into_blocking_iter(self) -> BlockingIter<S, F> {
        BlockingIter::new(self)
    }
}

impl<S: fmt::Debug, F> fmt::Debug for DataStream<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStream")
            .field("decoder", &self.decoder)
            .field("on_metadata", &self.on_metadata.is_some())
            .field("done", &self.done)
            .finish()
    }
}

impl<S, B, F> Stream for DataStream<S, F>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
    F: FnMut(Message),
{
    type Item = io::Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if *this.done {
                return Poll::Ready(None);
            }

            let message = match ready!(this.decoder.as_mut().poll_next(cx)) {
                Some(Ok(message)) => message,
                Some(Err(err)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            };

            match message.event() {
                "error" => {
                    log::trace!("> Error event, closing the data stream");
                    *this.done = true;
                    let err = EventError::new(message.into_data());
                    return Poll::Ready(Some(Err(err.into())));
                }
                "metadata" => match this.on_metadata.as_mut() {
                    Some(on_metadata) => on_metadata(message),
                    None => log::trace!("> Dropping metadata event"),
                },
                _ => return Poll::Ready(Some(Ok(message.into_data()))),
            }
        }
    }
}
