//! Blocking `Transport` backed by a ureq agent.

use std::io;
use std::time::Duration;

use catalog_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;

const TIMEOUT: Duration = Duration::from_secs(10);

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    /// 4xx/5xx responses come back as data so the core can interpret them.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(TIMEOUT))
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn transport_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::ConnectionRefused => {
            TransportError::ConnectionRefused(err.to_string())
        }
        other => TransportError::Other(other.to_string()),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = req.method.as_str(), url = %req.url, "request");
        let agent = &self.agent;
        let headers = req.headers.as_slice();

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&req.url), headers).call(),
            (HttpMethod::Head, _) => with_headers(agent.head(&req.url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(&req.url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(&req.url), headers)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(agent.post(&req.url), headers).send_empty(),
        };
        let mut response = result.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                Some((name.as_str().to_string(), value.to_str().ok()?.to_string()))
            })
            .collect();
        let body = if req.method == HttpMethod::Head {
            String::new()
        } else {
            response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::Other(e.to_string()))?
        };
        debug!(status, "response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
