//! Line framing over upstream byte streams.
//!
//! TalkAI answers every chat request with an SSE body. The adapters only ever
//! want complete lines, so this module turns an arbitrary chunked byte stream
//! into a stream of lines, independent of where chunk boundaries fall.

use bytes::{Bytes, BytesMut};
use futures::{pin_mut, Stream, StreamExt};

/// Split a byte stream into complete text lines.
///
/// Lines are delimited by `\n`; trailing `\r` is stripped so CRLF bodies
/// behave like LF bodies. A final unterminated line is yielded when the
/// stream ends. Transport errors pass through once and end the stream.
/// Lines that are not valid UTF-8 are logged and skipped.
pub fn lines<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    async_stream::stream! {
        let mut buffer = BytesMut::new();
        pin_mut!(byte_stream);

        while let Some(item) = byte_stream.next().await {
            match item {
                Ok(chunk) => {
                    buffer.extend_from_slice(&chunk);
                    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                        let raw = buffer.split_to(pos + 1);
                        match std::str::from_utf8(&raw[..pos]) {
                            Ok(line) => yield Ok(line.trim_end_matches('\r').to_string()),
                            Err(e) => {
                                tracing::warn!("Skipping non-UTF-8 upstream line: {}", e);
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        if !buffer.is_empty() {
            match std::str::from_utf8(&buffer) {
                Ok(line) => yield Ok(line.trim_end_matches('\r').to_string()),
                Err(e) => {
                    tracing::warn!("Skipping non-UTF-8 upstream tail: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    async fn collect(chunks: Vec<&str>) -> Vec<String> {
        let byte_stream =
            stream::iter(chunks.into_iter().map(|c| Ok::<_, String>(Bytes::from(c.to_string()))));
        lines(byte_stream).map(|r| r.unwrap()).collect().await
    }

    #[tokio::test]
    async fn test_lines_split_within_one_chunk() {
        let got = collect(vec!["data: a\ndata: b\n"]).await;
        assert_eq!(got, vec!["data: a", "data: b"]);
    }

    #[tokio::test]
    async fn test_line_spanning_chunk_boundary() {
        let got = collect(vec!["data: hel", "lo\ndata: ", "world\n"]).await;
        assert_eq!(got, vec!["data: hello", "data: world"]);
    }

    #[tokio::test]
    async fn test_crlf_is_stripped() {
        let got = collect(vec!["data: a\r\ndata: b\r\n"]).await;
        assert_eq!(got, vec!["data: a", "data: b"]);
    }

    #[tokio::test]
    async fn test_unterminated_tail_is_yielded() {
        let got = collect(vec!["data: a\ndata: tail"]).await;
        assert_eq!(got, vec!["data: a", "data: tail"]);
    }

    #[tokio::test]
    async fn test_empty_lines_preserved() {
        // Blank SSE separator lines still come through; filtering is the
        // adapters' concern.
        let got = collect(vec!["data: a\n\ndata: b\n"]).await;
        assert_eq!(got, vec!["data: a", "", "data: b"]);
    }

    #[tokio::test]
    async fn test_error_passes_through_and_ends_stream() {
        let byte_stream = stream::iter(vec![
            Ok(Bytes::from_static(b"data: a\n")),
            Err("boom".to_string()),
            Ok(Bytes::from_static(b"data: never\n")),
        ]);
        let got: Vec<Result<String, String>> = lines(byte_stream).collect().await;

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].as_ref().unwrap(), "data: a");
        assert_eq!(got[1].as_ref().unwrap_err(), "boom");
    }
}
