//! reqwest transport

use async_trait::async_trait;

use super::{ApiError, HttpMethod, RequestBody, RequestDescriptor, Transport, TransportResponse};

/// Transport over a `reqwest::Client`
///
/// With credentials enabled the client keeps a cookie store, so cookie
/// based sessions survive between requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(with_credentials: bool) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(with_credentials)
            .build()
            .map_err(|e| ApiError::Setup(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: RequestDescriptor) -> Result<TransportResponse, ApiError> {
        let RequestDescriptor {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(to_reqwest_method(method), &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ApiError::Setup(format!("Invalid request {} {}: {}", method, url, e))
            } else {
                ApiError::Request {
                    method,
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Decode {
            url: url.clone(),
            message: format!("Failed to read response body: {}", e),
        })?;

        Ok(TransportResponse { status, body })
    }
}
