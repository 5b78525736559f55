//! In-memory response writer.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Cursor, Read};

use apitest_application::ResponseWriter;
use apitest_domain::{Headers, StatusCode};

enum Segment {
    Bytes(Vec<u8>),
    Stream(Box<dyn Read + Send>),
}

/// Records everything a handler writes.
///
/// Headers are snapshotted when the status is written; later header changes
/// do not reach the recorded response, as on a real connection.
#[derive(Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: Headers,
    sent_headers: Option<Headers>,
    segments: Vec<Segment>,
}

impl ResponseRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, or `200 OK` if none was.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or_default()
    }

    /// Whether the handler has written a status (explicitly or by writing).
    #[must_use]
    pub const fn wrote_header(&self) -> bool {
        self.status.is_some()
    }

    /// Finishes recording, handing back the status, the headers as sent
    /// and a reader over the body.
    #[must_use]
    pub fn finish(self) -> RecordedResponse {
        let segments = self
            .segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Bytes(bytes) => Box::new(Cursor::new(bytes)) as Box<dyn Read + Send>,
                Segment::Stream(reader) => reader,
            })
            .collect();

        RecordedResponse {
            status: self.status.unwrap_or_default(),
            headers: self.sent_headers.unwrap_or(self.headers),
            body: RecordedBody { segments },
        }
    }
}

impl ResponseWriter for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    fn write_header(&mut self, status: StatusCode) {
        if let Some(current) = self.status {
            tracing::warn!(
                current = current.as_u16(),
                ignored = status.as_u16(),
                "superfluous write_header call"
            );
            return;
        }
        self.status = Some(status);
        self.sent_headers = Some(self.headers.clone());
    }

    fn write(&mut self, bytes: &[u8]) {
        if !self.wrote_header() {
            self.write_header(StatusCode::OK);
        }
        if let Some(Segment::Bytes(last)) = self.segments.last_mut() {
            last.extend_from_slice(bytes);
        } else {
            self.segments.push(Segment::Bytes(bytes.to_vec()));
        }
    }

    fn stream(&mut self, body: Box<dyn Read + Send>) {
        if !self.wrote_header() {
            self.write_header(StatusCode::OK);
        }
        self.segments.push(Segment::Stream(body));
    }
}

impl fmt::Debug for ResponseRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseRecorder")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("segments", &self.segments.len())
            .finish()
    }
}

/// A finished recording.
pub struct RecordedResponse {
    /// Final status.
    pub status: StatusCode,
    /// Headers as of the moment the status was written.
    pub headers: Headers,
    /// Body, still to be read.
    pub body: RecordedBody,
}

/// Reader over the recorded body segments, in write order.
pub struct RecordedBody {
    segments: VecDeque<Box<dyn Read + Send>>,
}

impl Read for RecordedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while let Some(front) = self.segments.front_mut() {
            let n = front.read(buf)?;
            if n > 0 {
                return Ok(n);
            }
            self.segments.pop_front();
        }
        Ok(0)
    }
}
