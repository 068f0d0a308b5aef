//! Incremental Server Sent Event decoder.
//!
//! Byte chunks go in, arbitrarily split. Lines are cut by [`LineSplitter`],
//! classified by [`classify`] and assembled into [`Message`]s by
//! [`Assembler`]. On top of that:
//!
//! - [`decode`] yields every message of a chunk stream,
//! - [`data_stream`] yields only the `data` payloads, turns `error` events
//!   into stream errors and hands `metadata` events to a callback,
//! - [`DataStream::into_blocking_iter`] consumes the payloads with a `for` loop.
//!
//! # Examples
//!
//! ```
//! use futures_lite::{future, stream, StreamExt};
//! use std::io;
//!
//! let chunks = stream::iter(vec![
//!     Ok::<_, io::Error>("event: metadata\ndata: {\"progress\": 50}\n\n"),
//!     Ok("data: actual data\n\n"),
//! ]);
//! let mut progress = vec![];
//! {
//!     let stream = sse_data_stream::data_stream_with_metadata(chunks, |m| progress.push(m));
//!     let data: Vec<String> = future::block_on(stream.try_collect()).unwrap();
//!     assert_eq!(data, vec!["actual data"]);
//! }
//! assert_eq!(progress[0].data(), "{\"progress\": 50}");
//! ```

#![forbid(rust_2018_idioms)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod assembler;
mod data;
mod decoder;
mod error;
mod field;
mod iter;
mod lines;
mod message;
mod reader;

pub use assembler::{Assembler, Handler, IdPolicy};
pub use data::{data_stream, data_stream_with_metadata, metadata_channel, DataStream};
pub use decoder::{decode, Decoder};
pub use error::EventError;
pub use field::{classify, Field};
pub use iter::BlockingIter;
pub use lines::LineSplitter;
pub use message::Message;
pub use reader::{decode_reader, Chunks};
