//! Stream transport port and its reqwest adapter.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tracing::debug;
use url::Url;

use crate::config::StreamClientConfig;
use crate::error::{StreamError, StreamResult};

/// Chunks of the log stream as they arrive from the network.
pub type ByteStream = BoxStream<'static, StreamResult<Bytes>>;

/// Opens a subscription to the log stream.
///
/// Each call is one subscription attempt. The session calls it again after
/// every interruption; implementations should not retry internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Subscribe and return the response body as a chunk stream.
    ///
    /// The returned stream ends when the server closes the response and
    /// yields an error if the connection drops.
    async fn subscribe(&self) -> StreamResult<ByteStream>;
}

/// HTTP transport for `GET /proxy/stream-logs`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    url: Url,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    ///
    /// Only a connect timeout is applied; the response body is expected to
    /// stay open indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &StreamClientConfig) -> StreamResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(StreamError::Client)?;

        Ok(Self {
            client,
            url: config.stream_url()?,
        })
    }

    /// The URL subscribed to.
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl StreamTransport for ReqwestTransport {
    async fn subscribe(&self) -> StreamResult<ByteStream> {
        debug!(url = %self.url, "Subscribing to log stream");

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|source| StreamError::Connect {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(StreamError::Body))
            .boxed())
    }
}
