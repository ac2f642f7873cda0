//! Shared test doubles for the query and print workflow tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use floodmap_core::error::{FloodMapError, FloodMapResult};
use floodmap_core::models::{ElevationResult, Feature, FeatureSet, LayerQuerySpec, LayerRole, Point};
use floodmap_core::print::{JobHandle, JobStatusResponse, PrintJobStatus, PrintJobTransport};
use floodmap_core::services::{ElevationService, LayerQueryService};

/// Layer query service backed by a per-role response map.
pub struct MockLayerService {
    responses: Mutex<HashMap<LayerRole, FeatureSet>>,
    failures: Mutex<HashMap<LayerRole, String>>,
    pub calls: AtomicUsize,
}

impl MockLayerService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_feature(self, role: LayerRole, field: &str, value: &str) -> Self {
        let feature = Feature::with_attributes([(field, json!(value))]);
        self.responses.lock().insert(role, FeatureSet::of(vec![feature]));
        self
    }

    pub fn with_features(self, role: LayerRole, features: FeatureSet) -> Self {
        self.responses.lock().insert(role, features);
        self
    }

    pub fn failing_on(self, role: LayerRole, message: &str) -> Self {
        self.failures.lock().insert(role, message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LayerQueryService for MockLayerService {
    async fn query_features(&self, spec: &LayerQuerySpec, _point: Point) -> FloodMapResult<FeatureSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.lock().get(&spec.role) {
            return Err(FloodMapError::QueryFailure(message.clone()));
        }
        Ok(self
            .responses
            .lock()
            .get(&spec.role)
            .cloned()
            .unwrap_or_else(FeatureSet::empty))
    }
}

/// Elevation service returning a fixed height in meters.
pub struct MockElevationService {
    z_meters: f64,
    failure: Option<String>,
    pub calls: AtomicUsize,
}

impl MockElevationService {
    pub fn returning(z_meters: f64) -> Self {
        Self {
            z_meters,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            z_meters: 0.0,
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ElevationService for MockElevationService {
    async fn query_elevation(&self, _point: Point) -> FloodMapResult<ElevationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(FloodMapError::QueryFailure(message.clone()));
        }
        Ok(ElevationResult { z: self.z_meters })
    }
}

/// Print transport with a scripted sequence of status responses.
pub struct MockPrintTransport {
    submit_status: Mutex<PrintJobStatus>,
    submit_failure: Mutex<Option<String>>,
    statuses: Mutex<VecDeque<JobStatusResponse>>,
    result_url: String,
    pub submitted_points: Mutex<Vec<Point>>,
    pub submit_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub result_calls: AtomicUsize,
}

impl MockPrintTransport {
    pub fn new() -> Self {
        Self {
            submit_status: Mutex::new(PrintJobStatus::Submitted),
            submit_failure: Mutex::new(None),
            statuses: Mutex::new(VecDeque::new()),
            result_url: "http://msc.fema.gov/output/firmette.pdf".to_string(),
            submitted_points: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            result_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_submission(self, message: &str) -> Self {
        *self.submit_failure.lock() = Some(message.to_string());
        self
    }

    /// Queue status responses in the order the poll loop should see them.
    pub fn with_statuses(self, statuses: Vec<PrintJobStatus>) -> Self {
        let mut queue = self.statuses.lock();
        for status in statuses {
            let results = if matches!(status, PrintJobStatus::Succeeded) {
                Some(succeeded_results())
            } else {
                None
            };
            queue.push_back(JobStatusResponse {
                job_id: "job-1".to_string(),
                status,
                results,
            });
        }
        drop(queue);
        self
    }

}

fn succeeded_results() -> floodmap_core::print::JobResults {
    serde_json::from_value(json!({ "OutputFile": { "paramUrl": "results/OutputFile" } }))
        .expect("results payload deserializes")
}

#[async_trait]
impl PrintJobTransport for MockPrintTransport {
    async fn submit_job(&self, point: Point) -> FloodMapResult<JobHandle> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted_points.lock().push(point);
        if let Some(message) = self.submit_failure.lock().clone() {
            return Err(FloodMapError::SubmissionFailure(message));
        }
        Ok(JobHandle {
            job_id: "job-1".to_string(),
            status: self.submit_status.lock().clone(),
        })
    }

    async fn job_status(&self, _job_id: &str) -> FloodMapResult<JobStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .pop_front()
            .ok_or_else(|| FloodMapError::PollFailure("Status queue exhausted".to_string()))
    }

    async fn job_result(
        &self,
        _job_id: &str,
        _param_url: &str,
    ) -> FloodMapResult<floodmap_core::print::JobResultResponse> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        serde_json::from_value(json!({ "value": { "url": self.result_url } }))
            .map_err(|e| FloodMapError::ResultFetchFailure(e.to_string()))
    }
}

/// A point inside the default test boundary.
pub fn test_point() -> Point {
    Point::new(46.1, -123.2, -13716578.0, 5800539.0)
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
