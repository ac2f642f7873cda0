//! Polling client driving one remote print job to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::job::{ArtifactLocation, JobHandle, JobStatusResponse, PrintJobStatus, OUTPUT_PARAM};
use super::transport::PrintJobTransport;
use crate::config::FloodMapConfig;
use crate::error::{FloodMapError, FloodMapResult};
use crate::models::Point;

/// Drives one asynchronous remote job: submit, poll on a fixed interval
/// while the status is non-terminal, then resolve the artifact location.
///
/// Nothing here retries; every failure is distinct and surfaced to the
/// caller, and a retry is a user-initiated restart of the whole workflow.
pub struct PrintJobClient {
    transport: Arc<dyn PrintJobTransport>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl PrintJobClient {
    pub fn new(
        transport: Arc<dyn PrintJobTransport>,
        poll_interval: Duration,
        max_poll_attempts: u32,
    ) -> Self {
        Self {
            transport,
            poll_interval,
            max_poll_attempts,
        }
    }

    pub fn from_config(transport: Arc<dyn PrintJobTransport>, config: &FloodMapConfig) -> Self {
        Self::new(
            transport,
            Duration::from_millis(config.poll_interval_ms),
            config.max_poll_attempts,
        )
    }

    /// Submit a generation job for `point`. A transport failure here is a
    /// `SubmissionFailure` and ends the workflow.
    pub async fn submit(&self, point: Point) -> FloodMapResult<JobHandle> {
        let handle = self.transport.submit_job(point).await?;
        info!(
            job_id = %handle.job_id,
            status = %handle.status,
            "Print job submitted"
        );
        Ok(handle)
    }

    /// Poll the job until its status is terminal.
    ///
    /// Polls on the fixed interval only while the status is `submitted` or
    /// `executing`, and stops the instant it becomes anything else:
    /// `succeeded` returns the final status response, any other value is a
    /// `JobFailed`. The loop is additionally bounded by the attempt ceiling
    /// and by the `cancelled` flag so an abandoned workflow leaks no polls.
    pub async fn poll_to_terminal(
        &self,
        handle: &JobHandle,
        cancelled: &AtomicBool,
    ) -> FloodMapResult<JobStatusResponse> {
        if let PrintJobStatus::Failed(raw) = &handle.status {
            return Err(FloodMapError::JobFailed(raw.clone()));
        }

        let mut attempts: u32 = 0;
        loop {
            if cancelled.load(Ordering::SeqCst) {
                return Err(FloodMapError::PollFailure("Polling cancelled".to_string()));
            }
            if attempts >= self.max_poll_attempts {
                return Err(FloodMapError::PollFailure(format!(
                    "Job {} not terminal after {attempts} polls",
                    handle.job_id
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
            if cancelled.load(Ordering::SeqCst) {
                return Err(FloodMapError::PollFailure("Polling cancelled".to_string()));
            }
            attempts += 1;

            let response = self.transport.job_status(&handle.job_id).await?;
            match &response.status {
                PrintJobStatus::Submitted | PrintJobStatus::Executing => {
                    debug!(
                        job_id = %handle.job_id,
                        status = %response.status,
                        attempts = attempts,
                        "Print job still running"
                    );
                }
                PrintJobStatus::Succeeded => {
                    info!(
                        job_id = %handle.job_id,
                        attempts = attempts,
                        "Print job succeeded"
                    );
                    return Ok(response);
                }
                PrintJobStatus::Failed(raw) => {
                    return Err(FloodMapError::JobFailed(raw.clone()));
                }
            }
        }
    }

    /// Resolve the succeeded job's output parameter into the final,
    /// scheme-normalized artifact location. Exactly one further call.
    pub async fn fetch_result(
        &self,
        handle: &JobHandle,
        status: &JobStatusResponse,
    ) -> FloodMapResult<ArtifactLocation> {
        let param_url = status
            .results
            .as_ref()
            .and_then(|results| results.output_file.as_ref())
            .map(|output| output.param_url.as_str())
            .ok_or_else(|| {
                FloodMapError::ResultFetchFailure(format!(
                    "Job {} status response missing {OUTPUT_PARAM} parameter",
                    handle.job_id
                ))
            })?;

        let response = self.transport.job_result(&handle.job_id, param_url).await?;
        let artifact = ArtifactLocation::secure(response.value.url);

        info!(
            job_id = %handle.job_id,
            url = %artifact,
            "Print artifact resolved"
        );

        Ok(artifact)
    }

    /// Full submit → poll → fetch sequence for one point.
    pub async fn run_to_completion(
        &self,
        point: Point,
        cancelled: &AtomicBool,
    ) -> FloodMapResult<ArtifactLocation> {
        let handle = self.submit(point).await?;
        let status = self.poll_to_terminal(&handle, cancelled).await?;
        self.fetch_result(&handle, &status).await
    }
}
