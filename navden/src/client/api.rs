//! The backend client abstraction.

use std::future::Future;

use super::error::ClientError;
use crate::model::{
    BackendInfo, CurrentState, HealthStatus, JammingAnalysis, MissionMetrics, ResetResult,
    SimulationRequest, SimulationResults, StepResult, TrajectoryPage,
};

/// REST surface of the NAVDEN backend.
///
/// One method per endpoint. Failures are returned to the caller as-is;
/// implementations do not retry.
pub trait BackendClient: Send + Sync {
    /// `GET /health`
    fn health(&self) -> impl Future<Output = Result<HealthStatus, ClientError>> + Send;

    /// `GET /info`
    fn info(&self) -> impl Future<Output = Result<BackendInfo, ClientError>> + Send;

    /// `POST /run-simulation {duration, dt}`
    fn run_simulation(
        &self,
        request: SimulationRequest,
    ) -> impl Future<Output = Result<SimulationResults, ClientError>> + Send;

    /// `GET /current-state`
    fn current_state(&self) -> impl Future<Output = Result<CurrentState, ClientError>> + Send;

    /// `GET /trajectory?limit=N`
    fn trajectory(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<TrajectoryPage, ClientError>> + Send;

    /// `GET /metrics`
    fn metrics(&self) -> impl Future<Output = Result<MissionMetrics, ClientError>> + Send;

    /// `GET /jamming-analysis`
    fn jamming_analysis(&self)
        -> impl Future<Output = Result<JammingAnalysis, ClientError>> + Send;

    /// `POST /step-simulation`
    fn step_simulation(&self) -> impl Future<Output = Result<StepResult, ClientError>> + Send;

    /// `POST /reset`
    fn reset(&self) -> impl Future<Output = Result<ResetResult, ClientError>> + Send;
}
