//! Line reassembly for the chunked log stream.
//!
//! Chunks are buffered as raw bytes and split on `\n` before any UTF-8
//! decoding. `\n` never occurs inside a multi-byte sequence, so a character
//! split across two chunks is reassembled before it is decoded.

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

/// Stateful chunk-to-line decoder.
///
/// Holds the trailing fragment that has not seen its newline yet.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: BytesMut,
}

impl FrameDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk without draining any lines.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Append a chunk and iterate the lines it completed.
    ///
    /// Lines not pulled from the iterator stay buffered for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.feed(chunk);
        Lines { decoder: self }
    }

    /// Take the next complete line, without its terminator.
    ///
    /// Accepts `\n` and `\r\n`. Invalid UTF-8 is replaced with U+FFFD.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line = self.buf.split_to(pos + 1);
        Some(decode(&line[..pos]))
    }

    /// Flush whatever is left after the stream ended as the final line.
    ///
    /// An empty final line carries no frame, so an empty buffer yields
    /// `None` in its place rather than `Some("")`.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = self.buf.split();
        Some(decode(&rest))
    }

    /// Bytes waiting for a newline.
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }
}

fn decode(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Iterator over the lines completed by a [`FrameDecoder::push`].
#[derive(Debug)]
pub struct Lines<'a> {
    decoder: &'a mut FrameDecoder,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.next_line()
    }
}

struct LineState<S> {
    stream: S,
    decoder: FrameDecoder,
    done: bool,
}

/// Adapt a byte stream into a lazy stream of lines.
///
/// On a clean end the buffered tail is yielded as a final line. A transport
/// error is forwarded and ends the line stream; the partial tail is dropped
/// with it.
pub fn decode_lines<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let state = LineState {
        stream: Box::pin(byte_stream),
        decoder: FrameDecoder::new(),
        done: false,
    };

    futures_util::stream::unfold(state, |mut st| async move {
        if st.done {
            return None;
        }

        loop {
            if let Some(line) = st.decoder.next_line() {
                return Some((Ok(line), st));
            }

            // Need more data from upstream.
            match st.stream.next().await {
                Some(Ok(chunk)) => st.decoder.feed(&chunk),
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.done = true;
                    let tail = st.decoder.finish();
                    return tail.map(|line| (Ok(line), st));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn test_complete_lines_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let lines: Vec<String> = decoder.push(b"one\ntwo\n").collect();
        assert_eq!(lines, vec!["one", "two"]);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push(b"data: {\"ro").count(), 0);
        assert_eq!(decoder.buffered_len(), 10);

        let lines: Vec<String> = decoder.push(b"ute\":\"/a\"}\n").collect();
        assert_eq!(lines, vec!["data: {\"route\":\"/a\"}"]);
    }

    #[test]
    fn test_split_inside_multibyte_character_at_every_offset() {
        let text = "data: {\"route\":\"/caf\u{e9}/\u{1f600}\",\"endpoint\":\"men\u{fc}\"}\n";
        let bytes = text.as_bytes();
        let expected = text.trim_end_matches('\n');

        for split in 0..=bytes.len() {
            let mut decoder = FrameDecoder::new();
            let mut lines: Vec<String> = decoder.push(&bytes[..split]).collect();
            lines.extend(decoder.push(&bytes[split..]));

            assert_eq!(lines, vec![expected.to_string()], "split at byte {split}");
            assert_eq!(decoder.buffered_len(), 0);
        }
    }

    #[test]
    fn test_crlf_terminator() {
        let mut decoder = FrameDecoder::new();
        let lines: Vec<String> = decoder.push(b"a\r\n\r\nb\r\n").collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_finish_flushes_tail() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push(b"first\nsecond").count(), 1);
        assert_eq!(decoder.finish(), Some("second".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_empty_final_line_yields_none() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push(b"done\n").count(), 1);
        assert_eq!(decoder.finish(), None);
        // The empty line it stands for would carry no frame either.
        assert!(matches!(crate::parser::EventFrameParser::parse(""), Ok(None)));
    }

    #[test]
    fn test_unconsumed_lines_stay_buffered() {
        let mut decoder = FrameDecoder::new();
        let first = decoder.push(b"a\nb\n").next();
        assert_eq!(first.as_deref(), Some("a"));
        assert_eq!(decoder.next_line().as_deref(), Some("b"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut decoder = FrameDecoder::new();
        let lines: Vec<String> = decoder.push(b"bad \xff byte\n").collect();
        assert_eq!(lines, vec!["bad \u{fffd} byte"]);
    }

    #[test]
    fn test_decode_lines_flushes_tail_on_end() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"data: one\n\nda")),
            Ok(Bytes::from_static(b"ta: two")),
        ];

        let lines: Vec<String> = tokio_test::block_on(
            decode_lines(stream::iter(chunks))
                .map(Result::unwrap)
                .collect(),
        );

        assert_eq!(lines, vec!["data: one", "", "data: two"]);
    }

    #[test]
    fn test_decode_lines_forwards_error_and_ends() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"ok\npartial")),
            Err(std::io::Error::other("reset")),
            Ok(Bytes::from_static(b"never\n")),
        ];

        let items: Vec<Result<String, std::io::Error>> =
            tokio_test::block_on(decode_lines(stream::iter(chunks)).collect());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "ok");
        assert!(items[1].is_err());
    }
}
