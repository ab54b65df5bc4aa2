//! Incremental row parsing for streamed response bodies.
//!
//! The service answers every query with semicolon separated CSV. Bodies are
//! consumed chunk by chunk as the transport delivers them, and rows are
//! handed out as soon as their line terminator arrives. Chunk boundaries
//! carry no meaning: a chunk may hold many rows, part of one, or split a
//! `\r\n` in two.
//!
//! Server side failures are reported with `200 OK` and the exception text
//! in the body. Each decoded chunk, joined to the unterminated line before
//! it, is checked for that marker before any row in it is parsed.

use std::collections::VecDeque;
use std::pin::Pin;

use csv_core::{ReadRecordResult, Reader, ReaderBuilder};
use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use futures::{Stream, StreamExt, stream};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::{debug, trace, warn};

use super::error::ApiError;

/// One parsed row, fields in column order.
pub type Row = Vec<String>;

/// Text the service embeds in a success body when a request failed.
const EXCEPTION_MARKER: &str = "Exception: ";

const FIELD_DELIMITER: u8 = b';';

/// Status and headers of the response being parsed.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    pub fn from_response(response: &reqwest::Response) -> Self {
        Self::new(response.status(), response.headers().clone())
    }

    /// Body encoding declared by the `Content-Type` charset, UTF-8 if absent
    /// or unknown.
    pub fn encoding(&self) -> &'static Encoding {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_label)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8)
    }

    /// A response error that keeps this response's status and headers.
    pub fn error(&self, message: impl Into<String>) -> ApiError {
        ApiError::Response {
            status: self.status,
            headers: Box::new(self.headers.clone()),
            message: message.into(),
        }
    }
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Whether the body is still being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    Normal,
    /// The exception marker was seen. No further rows are produced.
    Errored { message: String },
}

/// Exception text found in a response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InBandError {
    pub message: String,
}

/// Push parser turning body chunks into rows.
///
/// Decoder and CSV state persist across [`RowReader::feed`] calls, so a row,
/// a multi-byte character or the exception marker may span any number of
/// chunks. Fields of the row being assembled are held in `record`, with
/// `ends` marking where each field stops.
pub struct RowReader {
    decoder: Decoder,
    csv: Reader,
    state: ParserState,
    text: String,
    /// Decoded text since the last `\n`, including the current chunk.
    line: String,
    record: Vec<u8>,
    record_len: usize,
    ends: Vec<usize>,
    ends_len: usize,
}

impl RowReader {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            csv: ReaderBuilder::new().delimiter(FIELD_DELIMITER).build(),
            state: ParserState::Normal,
            text: String::new(),
            line: String::new(),
            record: vec![0; 256],
            record_len: 0,
            ends: vec![0; 16],
            ends_len: 0,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Feed one body chunk, appending every row it completes to `rows`.
    ///
    /// Returns the number of rows completed. Once the exception marker has
    /// been seen every call fails with the captured message and `rows` is
    /// left untouched.
    pub fn feed(&mut self, chunk: &[u8], rows: &mut VecDeque<Row>) -> Result<usize, InBandError> {
        if let ParserState::Errored { message } = &self.state {
            return Err(InBandError {
                message: message.clone(),
            });
        }

        self.decode(chunk);

        if self.scan_for_exception() {
            let message = self.line.trim().to_string();
            self.state = ParserState::Errored {
                message: message.clone(),
            };
            return Err(InBandError { message });
        }

        Ok(self.split_rows(rows))
    }

    /// Finish parsing at end of body.
    ///
    /// A trailing row without its line terminator is discarded. Returns
    /// `true` if such a row was pending.
    pub fn finish(&mut self) -> bool {
        let pending = self.record_len > 0 || self.ends_len > 0;
        self.record_len = 0;
        self.ends_len = 0;
        self.line.clear();
        pending
    }

    /// Look for the exception marker in the current chunk together with the
    /// unterminated line carried over from earlier chunks.
    ///
    /// On a hit `self.line` holds the text the message is taken from.
    /// Otherwise it is cut back to whatever follows the last `\n`.
    fn scan_for_exception(&mut self) -> bool {
        let carried = self.line.len();
        self.line.push_str(&self.text);
        if self.line.contains(EXCEPTION_MARKER) {
            return true;
        }
        if let Some(i) = self.text.rfind('\n') {
            self.line.drain(..carried + i + 1);
        }
        false
    }

    /// Decode `chunk` into `self.text`, replacing malformed sequences with
    /// U+FFFD. Incomplete trailing sequences stay in the decoder.
    fn decode(&mut self, chunk: &[u8]) {
        self.text.clear();
        let mut input = chunk;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len());
            self.text.reserve(needed);
            let (result, read, _) = self.decoder.decode_to_string(input, &mut self.text, false);
            input = &input[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }

    fn split_rows(&mut self, rows: &mut VecDeque<Row>) -> usize {
        let text = std::mem::take(&mut self.text);
        let mut input = text.as_bytes();
        let mut count = 0;

        // csv-core treats empty input as end of data, so it is never passed
        // an empty slice here.
        while !input.is_empty() {
            let (result, nin, nout, nend) = self.csv.read_record(
                input,
                &mut self.record[self.record_len..],
                &mut self.ends[self.ends_len..],
            );
            input = &input[nin..];
            self.record_len += nout;
            self.ends_len += nend;

            match result {
                ReadRecordResult::InputEmpty | ReadRecordResult::End => break,
                ReadRecordResult::OutputFull => {
                    let len = self.record.len().max(64);
                    self.record.resize(len * 2, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    let len = self.ends.len().max(8);
                    self.ends.resize(len * 2, 0);
                }
                ReadRecordResult::Record => {
                    rows.push_back(self.take_row());
                    count += 1;
                }
            }
        }

        self.text = text;
        count
    }

    fn take_row(&mut self) -> Row {
        let mut start = 0;
        let row = self.ends[..self.ends_len]
            .iter()
            .map(|&end| {
                let field = String::from_utf8_lossy(&self.record[start..end]).into_owned();
                start = end;
                field
            })
            .collect();
        self.record_len = 0;
        self.ends_len = 0;
        row
    }
}

struct RowStream<S> {
    body: Pin<Box<S>>,
    reader: RowReader,
    ready: VecDeque<Row>,
    meta: ResponseMeta,
    done: bool,
}

impl<S, B, E> RowStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    async fn next_row(&mut self) -> Option<Result<Row, ApiError>> {
        loop {
            if let Some(row) = self.ready.pop_front() {
                trace!(?row, "parsed row");
                return Some(Ok(row));
            }
            if self.done {
                return None;
            }

            let fed = match self.body.next().await {
                Some(Ok(chunk)) => self.reader.feed(chunk.as_ref(), &mut self.ready),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    if self.reader.finish() {
                        warn!("response ended mid-row, dropping unterminated row");
                    }
                    continue;
                }
            };

            if let Err(InBandError { message }) = fed {
                self.done = true;
                debug!(status = %self.meta.status, %message, "exception reported in response body");
                self.drain().await;
                return Some(Err(self.meta.error(message)));
            }
        }
    }

    /// Read the rest of the body without parsing it.
    async fn drain(&mut self) {
        while let Some(chunk) = self.body.next().await {
            if chunk.is_err() {
                break;
            }
        }
    }
}

/// Parse a streamed body into rows.
///
/// The returned stream owns `body`; dropping it early drops the body too,
/// which releases the underlying connection.
pub fn rows<S, B, E>(body: S, meta: ResponseMeta) -> impl Stream<Item = Result<Row, ApiError>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    let state = RowStream {
        body: Box::pin(body),
        reader: RowReader::new(meta.encoding()),
        ready: VecDeque::new(),
        meta,
        done: false,
    };
    stream::unfold(state, |mut state| async move {
        let item = state.next_row().await?;
        Some((item, state))
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const BODY: &str = "1;Helsinki;\"a;b\"\r\n2;Hämeenlinna;\"two\nlines\"\n3;-;\n\n4;\"q\"\"uote\";x\r\n";

    fn parse(chunks: &[&[u8]]) -> Vec<Row> {
        let mut reader = RowReader::new(UTF_8);
        let mut out = VecDeque::new();
        for chunk in chunks {
            reader.feed(chunk, &mut out).unwrap();
        }
        out.into_iter().collect()
    }

    proptest! {
        /// Any chunking yields the rows of the whole body parsed at once
        #[test]
        fn chunking_does_not_change_rows(
            mut cuts in proptest::collection::vec(0..BODY.len(), 0..12)
        ) {
            let bytes = BODY.as_bytes();
            cuts.sort_unstable();
            let mut chunks = Vec::new();
            let mut start = 0;
            for cut in cuts {
                chunks.push(&bytes[start..cut]);
                start = cut;
            }
            chunks.push(&bytes[start..]);

            prop_assert_eq!(parse(&chunks), parse(&[bytes]));
        }
    }

    #[test]
    fn whole_body_rows() {
        let rows = parse(&[BODY.as_bytes()]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["1", "Helsinki", "a;b"]);
        assert_eq!(rows[1], vec!["2", "Hämeenlinna", "two\nlines"]);
        assert_eq!(rows[2], vec!["3", "-", ""]);
        assert_eq!(rows[3], vec!["4", "q\"uote", "x"]);
    }
}
