//! Blocking `Transport` backed by ureq.

use expense_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::trace;

/// Executes requests on a shared ureq agent.
///
/// Status codes are never turned into errors here; the core client decides
/// what a 404 or 500 means.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!(method = req.method.as_str(), path = %req.path, "sending");
        let agent = &self.agent;
        let headers = &req.headers;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&req.path), headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(&req.path), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(&req.path), headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(agent.post(&req.path), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(agent.put(&req.path), headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(agent.put(&req.path), headers).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()))
}
