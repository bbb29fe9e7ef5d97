//! reqwest implementation of [`BackendClient`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api::BackendClient;
use super::config::ClientConfig;
use super::envelope::{decode, error_detail};
use super::error::ClientError;
use crate::model::{
    BackendInfo, CurrentState, HealthStatus, JammingAnalysis, MissionMetrics, ResetResult,
    SimulationRequest, SimulationResults, StepResult, TrajectoryPage,
};

/// Backend client over HTTP.
///
/// Holds a single `reqwest::Client` so connections are pooled across calls.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackendClient {
    /// Create a client for the configured backend.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("navden/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        field: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "GET");
        let request = self.http.get(&url).query(query);
        self.send(path, request, field).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        field: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "POST");
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(path, request, field).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
        field: Option<&str>,
    ) -> Result<T, ClientError> {
        let result = async {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;

            if !status.is_success() {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    detail: error_detail(&bytes),
                });
            }

            decode(&bytes, field)
        }
        .await;

        if let Err(ref e) = result {
            tracing::warn!(path, error = %e, "Backend request failed");
        }
        result
    }
}

impl BackendClient for HttpBackendClient {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get("/health", &[], None).await
    }

    async fn info(&self) -> Result<BackendInfo, ClientError> {
        self.get("/info", &[], None).await
    }

    async fn run_simulation(
        &self,
        request: SimulationRequest,
    ) -> Result<SimulationResults, ClientError> {
        request.validate().map_err(ClientError::InvalidRequest)?;

        tracing::info!(
            duration = request.duration,
            dt = request.dt,
            "Starting backend simulation run"
        );
        self.post("/run-simulation", Some(&request), None).await
    }

    async fn current_state(&self) -> Result<CurrentState, ClientError> {
        self.get("/current-state", &[], None).await
    }

    async fn trajectory(&self, limit: usize) -> Result<TrajectoryPage, ClientError> {
        self.get("/trajectory", &[("limit", limit.to_string())], None)
            .await
    }

    async fn metrics(&self) -> Result<MissionMetrics, ClientError> {
        self.get("/metrics", &[], Some("metrics")).await
    }

    async fn jamming_analysis(&self) -> Result<JammingAnalysis, ClientError> {
        self.get("/jamming-analysis", &[], Some("analysis")).await
    }

    async fn step_simulation(&self) -> Result<StepResult, ClientError> {
        self.post::<_, ()>("/step-simulation", None, None).await
    }

    async fn reset(&self) -> Result<ResetResult, ClientError> {
        self.post::<_, ()>("/reset", None, None).await
    }
}
