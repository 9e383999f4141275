//! Client for the proxy control endpoints.
//!
//! Plain request/response calls that sit next to the log stream: start and
//! stop the intercepting proxy, ask whether it is running, and read or save
//! its connection details.

use reqwest::RequestBuilder;
use routewatch_core::contracts::http::proxy::{
    GET_PROXY_PATH, IS_RUNNING_PATH, SAVE_PROXY_PATH, START_PATH, STOP_PATH,
};
use routewatch_core::{ControlMessage, ProxySettings, RunningStatus, SaveProxyRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::StreamClientConfig;
use crate::error::{ControlError, ControlResult};

/// Shown when a refusal carries no readable message.
const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// HTTP client for `/proxy/start`, `/proxy/stop`, `/proxy/is-running`,
/// `/proxy/get-proxy` and `/proxy/save-proxy`.
#[derive(Debug, Clone)]
pub struct ControlClient {
    client: reqwest::Client,
    base: Url,
}

impl ControlClient {
    /// Build a control client from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &StreamClientConfig) -> ControlResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base: config.base()?,
        })
    }

    /// Ask the server to start the proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Rejected`] when the proxy is already running
    /// or not configured.
    pub async fn start_proxy(&self) -> ControlResult<ControlMessage> {
        let url = self.url(START_PATH)?;
        self.send_json(self.client.post(url)).await
    }

    /// Ask the server to stop the proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Rejected`] when the proxy is not running.
    pub async fn stop_proxy(&self) -> ControlResult<ControlMessage> {
        let url = self.url(STOP_PATH)?;
        self.send_json(self.client.post(url)).await
    }

    /// Whether the proxy is currently running.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or an unexpected response.
    pub async fn is_running(&self) -> ControlResult<bool> {
        let url = self.url(IS_RUNNING_PATH)?;
        let status: RunningStatus = self.send_json(self.client.get(url)).await?;
        Ok(status.is_running)
    }

    /// Configured proxy connection details.
    ///
    /// All fields are `None` when nothing is configured.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or an unexpected response.
    pub async fn proxy_settings(&self) -> ControlResult<ProxySettings> {
        let url = self.url(GET_PROXY_PATH)?;
        self.send_json(self.client.get(url)).await
    }

    /// Replace the saved proxy settings.
    ///
    /// The request is validated locally first; an invalid one is never sent.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidSettings`] for an empty IP or port 0,
    /// and [`ControlError::Rejected`] with the server's `detail` when it
    /// refuses the save.
    pub async fn save_proxy_settings(
        &self,
        request: &SaveProxyRequest,
    ) -> ControlResult<ControlMessage> {
        request.validate()?;
        let url = self.url(SAVE_PROXY_PATH)?;
        debug!(ip = %request.ip, port = request.port, "Saving proxy settings");
        self.send_json(self.client.post(url).form(&request.form_fields()))
            .await
    }

    fn url(&self, path: &str) -> ControlResult<Url> {
        Ok(self.base.join(path)?)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ControlResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_message(&body);
            debug!(status = status.as_u16(), %message, "Control request rejected");
            return Err(ControlError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks for `message`, then FastAPI's `detail`, then falls back to the raw
/// text of a non-JSON body.
fn extract_message(body: &str) -> String {
    let body = body.trim();
    let message = match serde_json::from_str::<Value>(body) {
        Ok(value) => ["message", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => (!body.is_empty()).then(|| body.to_string()),
    };
    message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"Proxy is already running"}"#),
            "Proxy is already running"
        );
    }

    #[test]
    fn test_extract_detail_field() {
        assert_eq!(extract_message(r#"{"detail":"Not Found"}"#), "Not Found");
    }

    #[test]
    fn test_message_preferred_over_detail() {
        assert_eq!(
            extract_message(r#"{"detail":"d","message":"m"}"#),
            "m"
        );
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(extract_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(extract_message(""), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_message("{}"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(
            extract_message(r#"{"detail":[{"msg":"field required"}]}"#),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_invalid_save_is_not_sent() {
        // Nothing listens on port 9; a request that went out would fail with
        // a network error instead.
        let config = StreamClientConfig::new().with_base_url("http://127.0.0.1:9");
        let client = ControlClient::new(&config).unwrap();
        let request = SaveProxyRequest::new("127.0.0.1", 0, routewatch_core::ProxyType::ZerodayfToBrowser);

        assert!(matches!(
            client.save_proxy_settings(&request).await,
            Err(ControlError::InvalidSettings(
                routewatch_core::ProxySettingsError::InvalidPort
            ))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = StreamClientConfig::new().with_base_url("no scheme");
        assert!(matches!(
            ControlClient::new(&config),
            Err(ControlError::InvalidUrl(_))
        ));
    }
}
