use futures_lite::stream::{self, Stream, StreamExt};
use sse_data_stream::{data_stream, data_stream_with_metadata, metadata_channel, EventError, Message};
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

fn chunks(parts: &[&'static str]) -> stream::Iter<std::vec::IntoIter<io::Result<&'static str>>> {
    let parts: Vec<io::Result<&'static str>> = parts.iter().map(|p| Ok(*p)).collect();
    stream::iter(parts)
}

/// A chunk source that counts how often it is polled and notices being dropped.
struct Tracked {
    inner: stream::Iter<std::vec::IntoIter<io::Result<&'static str>>>,
    polls: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl Tracked {
    fn new(parts: &[&'static str]) -> (Self, Arc<AtomicUsize>, Arc<AtomicBool>) {
        let polls = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicBool::new(false));
        let tracked = Tracked {
            inner: chunks(parts),
            polls: polls.clone(),
            dropped: dropped.clone(),
        };
        (tracked, polls, dropped)
    }
}

impl Stream for Tracked {
    type Item = io::Result<&'static str>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[async_std::test]
async fn convert_event_stream_to_data_stream() -> io::Result<()> {
    let mut stream = data_stream(chunks(&["data: hello\n\n", "data: world\n\n"]));
    assert_eq!(stream.next().await.unwrap()?, "hello");
    assert_eq!(stream.next().await.unwrap()?, "world");
    assert!(stream.next().await.is_none());
    Ok(())
}

#[async_std::test]
async fn empty_data_events() -> io::Result<()> {
    let stream = data_stream(chunks(&["data: \n\n", "data:\n\n"]));
    let data: Vec<String> = stream.try_collect().await?;
    assert_eq!(data, vec!["", ""]);
    Ok(())
}

#[async_std::test]
async fn metadata_events() -> io::Result<()> {
    let (on_metadata, metadata) = metadata_channel();
    let mut stream = data_stream_with_metadata(
        chunks(&[
            "event: metadata\ndata: {\"progress\": 50}\n\n",
            "data: actual data\n\n",
        ]),
        on_metadata,
    );

    assert_eq!(stream.next().await.unwrap()?, "actual data");
    let meta = metadata.try_recv().expect("metadata delivered before the data");
    assert_eq!(meta.event(), "metadata");
    assert_eq!(meta.data(), "{\"progress\": 50}");
    assert_eq!(meta.id(), "");
    assert_eq!(meta.retry(), None);

    assert!(stream.next().await.is_none());
    assert!(metadata.try_recv().is_err());
    Ok(())
}

#[async_std::test]
async fn metadata_callback_sees_full_message() -> io::Result<()> {
    let mut seen: Vec<Message> = vec![];
    {
        let stream = data_stream_with_metadata(
            chunks(&["id: 3\nretry: 10\nevent: metadata\ndata: a\ndata: b\n\ndata: x\n\n"]),
            |message| seen.push(message),
        );
        let data: Vec<String> = stream.try_collect().await?;
        assert_eq!(data, vec!["x"]);
    }
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id(), "3");
    assert_eq!(seen[0].retry(), Some(10));
    assert_eq!(seen[0].data(), "a\nb");
    Ok(())
}

#[async_std::test]
async fn metadata_without_callback_is_dropped() -> io::Result<()> {
    let stream = data_stream(chunks(&[
        "event: metadata\ndata: {\"progress\": 50}\n\n",
        "data: actual data\n\n",
    ]));
    let data: Vec<String> = stream.try_collect().await?;
    assert_eq!(data, vec!["actual data"]);
    Ok(())
}

#[async_std::test]
async fn error_events() {
    let mut stream = data_stream(chunks(&["event: error\ndata: Something went wrong\n\n"]));
    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Something went wrong");
    assert_eq!(err.kind(), io::ErrorKind::Other);
    let event = EventError::from_io(&err).expect("an event error");
    assert_eq!(event.description(), "Something went wrong");
    assert!(stream.next().await.is_none());
}

#[async_std::test]
async fn nothing_after_an_error_event() {
    let mut stream = data_stream(chunks(&[
        "data: a\n\nevent: error\ndata: boom\n\ndata: b\n\n",
        "data: c\n\n",
    ]));
    assert_eq!(stream.next().await.unwrap().unwrap(), "a");
    assert_eq!(stream.next().await.unwrap().unwrap_err().to_string(), "boom");
    assert!(stream.next().await.is_none());
    assert!(stream.next().await.is_none());
}

#[async_std::test]
async fn upstream_error() {
    let parts = vec![
        Ok("data: a\n\n"),
        Err(io::Error::new(io::ErrorKind::TimedOut, "too slow")),
    ];
    let mut stream = data_stream(stream::iter(parts));
    assert_eq!(stream.next().await.unwrap().unwrap(), "a");
    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    assert!(EventError::from_io(&err).is_none());
    assert!(stream.next().await.is_none());
}

#[async_std::test]
async fn truncated_stream_completes() -> io::Result<()> {
    let mut stream = data_stream(chunks(&["data: a\n\ndata: b"]));
    let data: Vec<String> = (&mut stream).try_collect().await?;
    assert_eq!(data, vec!["a"]);
    assert!(stream.decoder().is_truncated());
    Ok(())
}

#[async_std::test]
async fn pulls_upstream_on_demand() -> io::Result<()> {
    let (source, polls, _) = Tracked::new(&["data: hello\n\ndata: again\n\n", "data: world\n\n"]);
    let mut stream = data_stream(source);
    assert_eq!(stream.next().await.unwrap()?, "hello");
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    assert_eq!(stream.next().await.unwrap()?, "again");
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    assert_eq!(stream.next().await.unwrap()?, "world");
    assert_eq!(polls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[async_std::test]
async fn dropping_cancels_upstream() -> io::Result<()> {
    let (source, polls, dropped) = Tracked::new(&["data: hello\n\n", "data: world\n\n"]);
    let mut stream = data_stream(source);
    assert_eq!(stream.next().await.unwrap()?, "hello");
    assert!(!dropped.load(Ordering::SeqCst));
    drop(stream);
    assert!(dropped.load(Ordering::SeqCst));
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn blocking_iter() {
    let stream = data_stream(chunks(&["data: first\n\n", "data: second\n\n"]));
    let mut results = vec![];
    for value in stream.into_blocking_iter() {
        results.push(value.unwrap());
    }
    assert_eq!(results, vec!["first", "second"]);
}

#[test]
fn blocking_iter_mixed_events() {
    let mut seen = vec![];
    let results: Vec<String> = {
        let stream = data_stream_with_metadata(
            chunks(&[
                "event: metadata\ndata: meta info\n\n",
                "data: first\n\n",
                "data: second\n\n",
            ]),
            |message: Message| seen.push(message),
        );
        stream
            .into_blocking_iter()
            .collect::<io::Result<_>>()
            .unwrap()
    };
    assert_eq!(results, vec!["first", "second"]);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].event(), "metadata");
    assert_eq!(seen[0].data(), "meta info");
}

#[test]
fn blocking_iter_is_single_pass() {
    let mut iter = data_stream(chunks(&["data: only\n\n"])).into_blocking_iter();
    assert_eq!(iter.next().unwrap().unwrap(), "only");
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn blocking_iter_stops_after_error() {
    let mut iter =
        data_stream(chunks(&["event: error\ndata: nope\n\ndata: later\n\n"])).into_blocking_iter();
    assert_eq!(iter.next().unwrap().unwrap_err().to_string(), "nope");
    assert!(iter.next().is_none());
}
