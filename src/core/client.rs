use crate::core::ConfigProvider;
use crate::domain::model::{MeasurementRequest, MeasurementResp, MeasurementType, Probe, ProbeSet};
use crate::domain::ports::{ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::utils::error::{AtlasError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Atlas API client: measurement submission and probe lookup over a `Transport`.
pub struct Client<T: Transport, C: ConfigProvider> {
    transport: T,
    config: C,
}

impl<T: Transport, C: ConfigProvider> Client<T, C> {
    pub fn new(transport: T, config: C) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint().trim_end_matches('/'), path)
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or(AtlasError::InvalidApiKey)
    }

    /// Empty one-off request over the configured probe pool.
    pub fn new_measurement(&self) -> MeasurementRequest {
        let probes = ProbeSet::new(
            self.config.pool_size(),
            self.config.area_type(),
            self.config.area_value(),
            self.config.tags(),
        );
        tracing::debug!("probes: {:?}", probes);
        MeasurementRequest::one_off(vec![probes])
    }

    /// Submits `request` to `POST {endpoint}/measurements/{type}/`.
    ///
    /// Definitions are not checked against `measurement_type`; the typed
    /// wrappers below do that before calling in.
    pub async fn create_measurement(
        &self,
        measurement_type: MeasurementType,
        request: &MeasurementRequest,
    ) -> Result<MeasurementResp> {
        let key = self.api_key()?;
        let body = serde_json::to_vec(request)?;

        let url = self.url(&format!("measurements/{}/", measurement_type));
        tracing::debug!("POST {} ({} bytes)", url, body.len());
        tracing::debug!("body: {}", String::from_utf8_lossy(&body));

        let response = self
            .transport
            .execute(ApiRequest {
                method: HttpMethod::Post,
                url,
                query: vec![("key".to_string(), key.to_string())],
                body: Some(body),
            })
            .await?;

        let created: MeasurementResp = decode(response)?;
        tracing::info!("Created {} measurement(s): {:?}", measurement_type, created.measurements);
        Ok(created)
    }

    async fn create_typed(
        &self,
        measurement_type: MeasurementType,
        request: &MeasurementRequest,
    ) -> Result<MeasurementResp> {
        request.ensure_type(measurement_type)?;
        self.create_measurement(measurement_type, request).await
    }

    pub async fn dns(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::Dns, request).await
    }

    pub async fn http(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::Http, request).await
    }

    pub async fn ntp(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::Ntp, request).await
    }

    pub async fn ping(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::Ping, request).await
    }

    pub async fn ssl_cert(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::SslCert, request).await
    }

    pub async fn traceroute(&self, request: &MeasurementRequest) -> Result<MeasurementResp> {
        self.create_typed(MeasurementType::Traceroute, request).await
    }

    /// Dispatches to the typed wrapper matching `measurement_type`.
    pub async fn submit(
        &self,
        measurement_type: MeasurementType,
        request: &MeasurementRequest,
    ) -> Result<MeasurementResp> {
        match measurement_type {
            MeasurementType::Dns => self.dns(request).await,
            MeasurementType::Http => self.http(request).await,
            MeasurementType::Ntp => self.ntp(request).await,
            MeasurementType::Ping => self.ping(request).await,
            MeasurementType::SslCert => self.ssl_cert(request).await,
            MeasurementType::Traceroute => self.traceroute(request).await,
        }
    }

    /// Fetches `GET {endpoint}/probes/{id}/`; the key is sent when one is configured.
    pub async fn get_probe(&self, id: u32) -> Result<Probe> {
        let query = match self.api_key() {
            Ok(key) => vec![("key".to_string(), key.to_string())],
            Err(_) => Vec::new(),
        };

        let url = self.url(&format!("probes/{}/", id));
        tracing::debug!("GET {}", url);

        let response = self
            .transport
            .execute(ApiRequest {
                method: HttpMethod::Get,
                url,
                query,
                body: None,
            })
            .await?;

        decode(response)
    }
}

fn decode<D: DeserializeOwned>(response: ApiResponse) -> Result<D> {
    if !response.is_success() {
        let message = match serde_json::from_slice::<ApiErrorEnvelope>(&response.body) {
            Ok(ApiErrorEnvelope { error }) => match (error.title, error.detail) {
                (Some(title), Some(detail)) => format!("{}: {}", title, detail),
                (title, detail) => title.or(detail).unwrap_or_else(|| response.body_text()),
            },
            Err(_) => response.body_text(),
        };
        tracing::debug!("API error {}: {}", response.status, message);
        return Err(AtlasError::ApiError {
            status: response.status,
            message,
        });
    }

    serde_json::from_slice(&response.body).map_err(|source| AtlasError::ResponseParseError {
        source,
        body: response.body_text(),
    })
}
