//! The transport seam: the one place the core touches the network.
//!
//! Any HTTP client can sit behind `Transport`. A transport may either return
//! non-2xx responses as data or report them as `TransportError` with a
//! status; the dispatch path in `client` accepts both.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "reqwest-transport")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport {
    use async_trait::async_trait;
    use reqwest::{Client, Method};

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` over a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> TransportError {
        TransportError {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = self.client.request(method(request.method), request.url.as_str());
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await.map_err(from_reqwest)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await.map_err(from_reqwest)?;

            if !(200..300).contains(&status) {
                return Err(TransportError::status(status, body));
            }
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

}
