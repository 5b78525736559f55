//! Handler and response-writer ports.

use std::io::Read;

use apitest_domain::{Headers, RequestSpec, StatusCode};

/// Where a handler writes its response.
///
/// Mirrors a server's response writer: headers may be changed until the
/// status is written, the first status wins, and the first body write
/// implies `200 OK` if no status was written yet.
pub trait ResponseWriter {
    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut Headers;

    /// Writes the status line. Only the first call has an effect.
    fn write_header(&mut self, status: StatusCode);

    /// Appends bytes to the body.
    fn write(&mut self, bytes: &[u8]);

    /// Attaches a streaming body, read to completion after the handler
    /// returns. Bytes already written stay in front of it.
    fn stream(&mut self, body: Box<dyn Read + Send>);
}

/// The unit under test: consumes a request and writes a response.
///
/// Functions and closures with the matching signature are handlers:
///
/// ```
/// use apitest_application::{Handler, ResponseWriter};
/// use apitest_domain::{RequestSpec, StatusCode};
///
/// fn no_content(w: &mut dyn ResponseWriter, _r: &RequestSpec) {
///     w.write_header(StatusCode::NO_CONTENT);
/// }
///
/// fn takes_handler(_: impl Handler) {}
/// takes_handler(no_content);
/// ```
pub trait Handler: Send + Sync {
    /// Handles one request, writing the response into `w`.
    fn serve(&self, w: &mut dyn ResponseWriter, r: &RequestSpec);
}

impl<F> Handler for F
where
    F: Fn(&mut dyn ResponseWriter, &RequestSpec) + Send + Sync,
{
    fn serve(&self, w: &mut dyn ResponseWriter, r: &RequestSpec) {
        self(w, r);
    }
}
