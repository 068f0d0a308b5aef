use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::io::AsyncBufRead;
use futures_lite::ready;
use futures_lite::stream::Stream;
use pin_project_lite::pin_project;

use crate::{decode, Decoder};

/// Decode SSE messages from an async reader.
///
/// # Examples
///
/// ```
/// use futures_lite::{future, io::Cursor, StreamExt};
///
/// let mut messages = sse_data_stream::decode_reader(Cursor::new("data: hi\n\n"));
/// let message = future::block_on(messages.next()).unwrap().unwrap();
/// assert_eq!(message.data(), "hi");
/// ```
pub fn decode_reader<R>(reader: R) -> Decoder<Chunks<R>>
where
    R: AsyncBufRead,
{
    decode(Chunks::new(reader))
}

pin_project! {
    /// A stream of the byte chunks read from an [`AsyncBufRead`].
    ///
    /// Each item is one filled buffer of the reader.
    #[derive(Debug)]
    pub struct Chunks<R> {
        #[pin]
        reader: R,
    }
}

impl<R> Chunks<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: AsyncBufRead> Stream for Chunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        let chunk = match ready!(this.reader.as_mut().poll_fill_buf(cx)) {
            Ok([]) => return Poll::Ready(None),
            Ok(available) => available.to_vec(),
            Err(err) => return Poll::Ready(Some(Err(err))),
        };
        this.reader.consume(chunk.len());
        Poll::Ready(Some(Ok(chunk)))
    }
}
