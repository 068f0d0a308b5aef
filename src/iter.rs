use std::fmt;
use std::io;
use std::iter::FusedIterator;
use std::pin::Pin;

use futures_lite::future;
use futures_lite::prelude::*;

use crate::{DataStream, Message};

/// A blocking iterator over event data, created by
/// [`DataStream::into_blocking_iter`].
///
/// Each call to `next` blocks the current thread until the next data payload
/// is decoded, the byte stream ends, or it fails. The iterator is single pass:
/// once it returned an error or `None` it keeps returning `None`.
///
/// # Examples
///
/// ```
/// use futures_lite::stream;
/// use std::io;
///
/// let chunks = stream::iter(vec![Ok::<_, io::Error>("data: first\n\ndata: second\n\n")]);
/// let mut data = vec![];
/// for item in sse_data_stream::data_stream(chunks).into_blocking_iter() {
///     data.push(item.unwrap());
/// }
/// assert_eq!(data, vec!["first", "second"]);
/// ```
pub struct BlockingIter<S, F> {
    stream: Pin<Box<DataStream<S, F>>>,
}

impl<S, F> BlockingIter<S, F> {
    pub(crate) fn new(stream: DataStream<S, F>) -> Self {
        Self {
            stream: Box::pin(stream),
        }
    }
}

impl<S: fmt::Debug, F> fmt::Debug for BlockingIter<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingIter")
            .field("stream", &self.stream)
            .finish()
    }
}

impl<S, B, F> Iterator for BlockingIter<S, F>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
    F: FnMut(Message),
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        future::block_on(self.stream.next())
    }
}

impl<S, B, F> FusedIterator for BlockingIter<S, F>
where
    S: Stream<Item = io::Result<B>>,
    B: AsRef<[u8]>,
    F: FnMut(Message),
{
}
