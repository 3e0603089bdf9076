use crate::utils::error::Result;
use async_trait::async_trait;

/// Client-wide settings the builders and the submitter read from.
pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn pool_size(&self) -> u32;
    fn area_type(&self) -> &str;
    fn area_value(&self) -> &str;
    fn tags(&self) -> &str;
    fn default_probe(&self) -> Option<u32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully prepared call: absolute URL, query pairs and optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Status and the whole body, already read off the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}
