use std::mem;

/// The UTF-8 byte order mark, stripped once at the start of a stream.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Splits a chunked byte stream into lines.
///
/// Lines end on `\n`, `\r` or `\r\n`. Chunks may be cut anywhere, including
/// between the `\r` and `\n` of a single terminator. Any bytes following the
/// last terminator are kept until the next call to [`feed`].
///
/// # Examples
///
/// ```
/// use sse_data_stream::LineSplitter;
///
/// let mut lines = LineSplitter::new();
/// let mut seen = vec![];
/// lines.feed(b"id: a", |line, colon| seen.push((line.to_vec(), colon)));
/// lines.feed(b"bc\r\n: hi\n", |line, colon| seen.push((line.to_vec(), colon)));
/// assert_eq!(seen, vec![(b"id: abc".to_vec(), Some(2)), (b": hi".to_vec(), Some(0))]);
/// ```
///
/// [`feed`]: LineSplitter::feed
#[derive(Debug, Default)]
pub struct LineSplitter {
    buf: Vec<u8>,
    skip_lf: bool,
    bom_checked: bool,
}

impl LineSplitter {
    /// Create a new, empty splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, calling `on_line` once for every line it completes.
    ///
    /// `on_line` receives the line without its terminator and the index of the
    /// first `:` in it, if any.
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_line: F)
    where
        F: FnMut(&[u8], Option<usize>),
    {
        if self.bom_checked {
            self.scan(chunk, &mut on_line);
            return;
        }

        // Hold back a prefix that could still become a BOM.
        self.buf.extend_from_slice(chunk);
        if self.buf.len() < BOM.len() && BOM.starts_with(&self.buf) {
            return;
        }
        self.bom_checked = true;
        let pending = mem::take(&mut self.buf);
        let start = if pending.starts_with(BOM) {
            log::trace!("< Stripped byte order mark");
            BOM.len()
        } else {
            0
        };
        self.scan(&pending[start..], &mut on_line);
    }

    /// Whether bytes of an unterminated line are buffered.
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }

    fn scan<F>(&mut self, mut chunk: &[u8], on_line: &mut F)
    where
        F: FnMut(&[u8], Option<usize>),
    {
        // The previous chunk ended in `\r`; a leading `\n` belongs to it.
        if self.skip_lf && !chunk.is_empty() {
            self.skip_lf = false;
            if chunk[0] == b'\n' {
                chunk = &chunk[1..];
            }
        }

        while let Some(i) = memchr::memchr2(b'\r', b'\n', chunk) {
            let line = if self.buf.is_empty() {
                &chunk[..i]
            } else {
                self.buf.extend_from_slice(&chunk[..i]);
                &self.buf[..]
            };
            on_line(line, memchr::memchr(b':', line));
            self.buf.clear();

            let used = match chunk.get(i + 1) {
                Some(b'\n') if chunk[i] == b'\r' => i + 2,
                None if chunk[i] == b'\r' => {
                    self.skip_lf = true;
                    i + 1
                }
                _ => i + 1,
            };
            chunk = &chunk[used..];
        }

        self.buf.extend_from_slice(chunk);
    }
}
