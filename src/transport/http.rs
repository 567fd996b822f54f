use super::{ResponseEnvelope, Transport, TransportError, TransportRequest};
use crate::request::Method;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Default transport backend over a shared `reqwest` client.
///
/// Connection pooling, TLS, and request timeouts live here; the orchestrator
/// above has no timeout of its own.
pub struct HttpTransport {
    client: reqwest::Client,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self { client })
    }

    async fn execute(&self, method: Method, request: &TransportRequest) -> Result<ResponseEnvelope> {
        let mut req = match method {
            Method::Get => self.client.get(&request.uri),
            Method::Post => self.client.post(&request.uri),
            Method::Put => self.client.put(&request.uri),
            Method::Patch => self.client.patch(&request.uri),
            Method::Delete => self.client.delete(&request.uri),
        };

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Transport(TransportError::Status {
                status: status.as_u16(),
                uri: request.uri.clone(),
            }));
        }

        let body = response
            .json()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        Ok(ResponseEnvelope {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        self.execute(Method::Get, request).await
    }

    async fn post(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        self.execute(Method::Post, request).await
    }

    async fn put(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        self.execute(Method::Put, request).await
    }

    async fn patch(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        self.execute(Method::Patch, request).await
    }

    async fn delete(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        self.execute(Method::Delete, request).await
    }
}
