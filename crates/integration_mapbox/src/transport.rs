//! reqwest-backed transport client

use std::time::Duration;

use application::{HttpMethod, TransportClient, TransportError, TransportRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::MapboxConfig;
use crate::error::MapboxError;

/// Transport client issuing provider queries over HTTPS
///
/// One connection pool is shared by every request of an engine. Dropping the
/// `dispatch` future aborts the request.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Create a transport with the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &MapboxConfig) -> Result<Self, MapboxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MapboxError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_error(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl TransportClient for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.redacted_url()))]
    async fn dispatch(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;
        let status = response.status().as_u16();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.map_error(&e)
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        debug!(status, bytes = body.len(), "Provider responded");
        Ok(TransportResponse::new(status, body))
    }
}
