use std::borrow::Cow;

/// A single classified line of an event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
    /// An empty line. Dispatches the current message.
    Blank,
    /// A line starting with `:`.
    Comment,
    /// A line without a colon, or with an unrecognized field name.
    Unknown,
    /// The `id` field.
    Id(Cow<'a, str>),
    /// The `event` field.
    Event(Cow<'a, str>),
    /// The `data` field.
    Data(Cow<'a, str>),
    /// The `retry` field, not yet validated.
    Retry(Cow<'a, str>),
}

/// Classify a line given the index of its first colon.
///
/// A single space directly after the colon is not part of the value. Field
/// names are matched case-sensitively.
///
/// # Examples
///
/// ```
/// use sse_data_stream::{classify, Field};
///
/// assert_eq!(classify(b"data: hi", Some(4)), Field::Data("hi".into()));
/// assert_eq!(classify(b": ping", Some(0)), Field::Comment);
/// assert_eq!(classify(b"", None), Field::Blank);
/// ```
pub fn classify(line: &[u8], colon: Option<usize>) -> Field<'_> {
    let colon = match colon {
        None if line.is_empty() => return Field::Blank,
        None => return Field::Unknown,
        Some(0) => return Field::Comment,
        Some(colon) => colon,
    };

    let name = &line[..colon.min(line.len())];
    let mut value = line.get(colon + 1..).unwrap_or(&[]);
    if let Some(b' ') = value.first() {
        value = &value[1..];
    }
    let value = String::from_utf8_lossy(value);

    match name {
        b"id" => Field::Id(value),
        b"event" => Field::Event(value),
        b"data" => Field::Data(value),
        b"retry" => Field::Retry(value),
        _ => Field::Unknown,
    }
}
