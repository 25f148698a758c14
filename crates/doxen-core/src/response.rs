//! Deferred responses.

use std::fmt;
use std::io::{self, Write};

type Producer = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + Send>;

/// Response prepared by a listener and written later by the host.
///
/// The body is produced by a one-shot callback captured at preparation time.
/// Nothing is serialized until the host calls [`write_to`](Self::write_to).
pub struct Response {
    content_type: &'static str,
    producer: Producer,
}

impl Response {
    /// Create a response whose body is written by `producer`.
    pub fn new<F>(content_type: &'static str, producer: F) -> Self
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        Self {
            content_type,
            producer: Box::new(producer),
        }
    }

    /// MIME type of the body.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Run the producer, writing the body into `out`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the producer or the writer.
    pub fn write_to(self, out: &mut dyn Write) -> io::Result<()> {
        (self.producer)(out)
    }

    /// Run the producer into a byte buffer.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the producer.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        let mut body = Vec::new();
        self.write_to(&mut body)?;
        Ok(body)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn test_producer_runs_only_when_written() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let response = Response::new("text/plain", move |out| {
            flag.store(true, Ordering::SeqCst);
            out.write_all(b"body")
        });

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(response.content_type(), "text/plain");

        let body = response.into_bytes().unwrap();

        assert!(called.load(Ordering::SeqCst));
        assert_eq!(body, b"body");
    }
}
