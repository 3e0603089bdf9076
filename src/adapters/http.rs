use crate::domain::ports::{ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        let mut builder = builder.query(&request.query).header(ACCEPT, "application/json");
        if let Some(body) = request.body {
            // reqwest sets Content-Length from the buffer
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!("{:?} {}", request.method, request.url);
        // reqwest errors carry the URL, and the URL carries the key
        let response = builder.send().await.map_err(reqwest::Error::without_url)?;
        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        // consumes the response, the connection is released whatever happens next
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?
            .to_vec();

        Ok(ApiResponse { status, body })
    }
}
