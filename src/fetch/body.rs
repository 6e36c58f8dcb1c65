//! Size-capped body reading.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::error_handling::Skip;

/// Body bytes read under a cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBody {
    pub bytes: Vec<u8>,
    /// `true` if a chunk was cut at the cap (more data was on offer)
    pub truncated: bool,
}

impl BoundedBody {
    /// Decodes as UTF-8, replacing invalid sequences (including a character
    /// split by the cap).
    pub fn into_text(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

/// Reads at most `max_bytes` from a chunk stream.
///
/// The stream is polled only while the buffer is below the cap; once the cap is
/// reached, reading stops and the rest of the stream is left unread. Callers
/// drop the stream afterwards, which closes the connection.
pub async fn read_bounded<S, E>(mut stream: S, max_bytes: usize) -> Result<BoundedBody, E>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    let mut buf = Vec::with_capacity(max_bytes.min(16 * 1024));
    let mut truncated = false;

    while buf.len() < max_bytes {
        let chunk = match stream.next().await {
            Some(chunk) => chunk?,
            None => break,
        };
        let remaining = max_bytes - buf.len();
        if chunk.len() > remaining {
            buf.extend_from_slice(&chunk[..remaining]);
            truncated = true;
            break;
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(BoundedBody {
        bytes: buf,
        truncated,
    })
}

/// Reads a JSON API response under `max_bytes` and deserializes it.
///
/// A body larger than the cap is `Skip::Upstream`, as is invalid JSON.
pub async fn read_json_bounded<T: DeserializeOwned>(
    response: reqwest::Response,
    max_bytes: usize,
) -> Result<T, Skip> {
    let body = read_bounded(Box::pin(response.bytes_stream()), max_bytes).await?;
    if body.truncated {
        return Err(Skip::Upstream(format!(
            "response larger than {} bytes",
            max_bytes
        )));
    }
    serde_json::from_slice(&body.bytes).map_err(|e| Skip::Upstream(e.to_string()))
}
