//! Streaming download of bulk result files.
//!
//! Result files are JSONL: one JSON record per newline-terminated line. The
//! file can be far larger than memory, so the download is exposed as a
//! [`Stream`] of complete lines backed by the response's byte stream, and at
//! most one line plus one network chunk is buffered at a time.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};

use super::errors::BulkError;

/// Opens the result file at `url` and returns a stream of its lines.
///
/// The URL is pre-signed and self-authorizing, so the request carries no
/// Admin API headers.
pub(super) async fn fetch_lines(
    client: &reqwest::Client,
    url: &str,
) -> Result<LineStream, BulkError> {
    let response = client.get(url).send().await.map_err(|e| BulkError::Fetch {
        detail: format!("opening result stream: {e}"),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BulkError::Fetch {
            detail: format!("result URL returned HTTP {status}"),
        });
    }

    Ok(LineStream::new(response.bytes_stream().boxed()))
}

/// A stream of complete text lines over a stream of byte chunks.
///
/// Lines are split on `\n`; a trailing `\r` is stripped so CRLF files decode
/// identically. A final line without a terminating newline is still emitted.
/// After the first error the stream is fused: the partial buffer is dropped
/// rather than surfaced as a truncated record.
pub(super) struct LineStream {
    inner: Option<BoxStream<'static, reqwest::Result<Bytes>>>,
    buffer: Vec<u8>,
}

impl LineStream {
    pub(super) fn new(inner: BoxStream<'static, reqwest::Result<Bytes>>) -> Self {
        Self {
            inner: Some(inner),
            buffer: Vec::new(),
        }
    }

    fn take_buffered_line(&mut self) -> Option<Result<String, BulkError>> {
        let newline = self.buffer.iter().position(|&byte| byte == b'\n')?;
        let mut raw: Vec<u8> = self.buffer.drain(..=newline).collect();
        raw.pop();
        Some(Self::decode(raw))
    }

    fn decode(mut raw: Vec<u8>) -> Result<String, BulkError> {
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        String::from_utf8(raw).map_err(|_| BulkError::Fetch {
            detail: "result stream contained invalid UTF-8".to_string(),
        })
    }
}

impl Stream for LineStream {
    type Item = Result<String, BulkError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.as_mut().get_mut();

        loop {
            if let Some(line) = this.take_buffered_line() {
                return Poll::Ready(Some(line));
            }

            let Some(inner) = this.inner.as_mut() else {
                return Poll::Ready(None);
            };

            match inner.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => this.buffer.extend_from_slice(&chunk),
                Poll::Ready(Some(Err(e))) => {
                    this.inner = None;
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(BulkError::Fetch {
                        detail: format!("result stream interrupted mid-body: {e}"),
                    })));
                }
                Poll::Ready(None) => {
                    this.inner = None;
                    if this.buffer.is_empty() {
                        return Poll::Ready(None);
                    }
                    let raw = std::mem::take(&mut this.buffer);
                    return Poll::Ready(Some(Self::decode(raw)));
                }
            }
        }
    }
}
