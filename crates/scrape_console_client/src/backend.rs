use std::time::Duration;

use console_logging::{console_debug, console_warn};
use reqwest::Url;
use scrape_console_core::{
    DefaultsResponse, HistoryEntry, PathField, PickResponse, RunReply, RunRequest, RunResult,
};
use serde_json::Value;

use crate::{ClientError, FailureKind};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// `None` leaves requests unbounded; a scrape run can take minutes.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    /// Endpoints resolve relative to `base_url`, so its path is treated as a
    /// directory: `http://host/app` becomes `http://host/app/`.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(base_url))
    }
}

/// The scrape backend's HTTP surface.
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// `GET /defaults`.
    async fn defaults(&self) -> Result<DefaultsResponse, ClientError>;

    /// `GET /history`. A body that is valid JSON but not an array yields no entries.
    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError>;

    /// `GET /pick-input`, `/pick-output` or `/pick-invalid`.
    async fn pick(&self, field: PathField) -> Result<PickResponse, ClientError>;

    /// `POST /run`. Non-success statuses are part of the reply, not an error.
    async fn run(&self, body: &RunRequest) -> Result<RunReply, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        console_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            console_warn!("GET {} answered {}; decoding body anyway", path, status);
        }
        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl BackendClient for ReqwestBackend {
    async fn defaults(&self) -> Result<DefaultsResponse, ClientError> {
        self.get_json("defaults").await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let body: Value = self.get_json("history").await?;
        match body {
            Value::Array(_) => serde_json::from_value(body)
                .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string())),
            other => {
                console_debug!("history body is not an array: {}", other);
                Ok(Vec::new())
            }
        }
    }

    async fn pick(&self, field: PathField) -> Result<PickResponse, ClientError> {
        self.get_json(field.pick_endpoint()).await
    }

    async fn run(&self, body: &RunRequest) -> Result<RunReply, ClientError> {
        let url = self.endpoint("run")?;
        console_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let http_ok = response.status().is_success();
        let result = response
            .json::<RunResult>()
            .await
            .map_err(map_reqwest_error)?;
        Ok(RunReply { http_ok, result })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClientError::new(FailureKind::Decode, err.to_string());
    }
    if err.is_connect() {
        return ClientError::new(FailureKind::Connect, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
