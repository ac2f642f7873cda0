use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::PrintEvent;
use super::notify::{StateChange, StateNotifier};
use super::states::PrintState;
use crate::error::{FloodMapError, FloodMapResult};
use crate::models::Point;
use crate::print::{ArtifactLocation, PrintJobClient};

/// How a print or retry request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintRequest {
    /// A workflow was started.
    Started,
    /// The guard dropped the request (already printing, or retry outside
    /// the error state).
    Ignored,
}

/// Supervises the print workflow for one session.
///
/// A request records the point as the retained subject and runs the
/// submit/poll/fetch sequence on a background task. Any step failure lands
/// in `error` with the point preserved so a user-initiated retry can re-run
/// the whole sequence; success retains the artifact location for download.
/// The in-flight workflow holds a cancellation flag so teardown cannot leak
/// a poll loop.
pub struct PrintStateMachine {
    shared: Arc<PrintShared>,
    workflow: Mutex<Option<Workflow>>,
}

struct PrintShared {
    client: PrintJobClient,
    state: Mutex<PrintState>,
    point: Mutex<Option<Point>>,
    artifact: Mutex<Option<ArtifactLocation>>,
    notifier: StateNotifier<PrintState>,
}

struct Workflow {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PrintStateMachine {
    pub fn new(client: PrintJobClient) -> Self {
        Self {
            shared: Arc::new(PrintShared {
                client,
                state: Mutex::new(PrintState::default()),
                point: Mutex::new(None),
                artifact: Mutex::new(None),
                notifier: StateNotifier::default(),
            }),
            workflow: Mutex::new(None),
        }
    }

    /// Request a print for `point`. A request while already `printing` is a
    /// no-op; from `ready`, `printed` or `error` it starts a fresh workflow.
    ///
    /// The workflow runs on a spawned background task, so this must be
    /// called from within a tokio runtime.
    pub fn request_print(&self, point: Point) -> FloodMapResult<PrintRequest> {
        {
            let state = self.shared.state.lock();
            if state.is_busy() {
                debug!(state = %*state, "Print workflow already in flight - ignoring request");
                return Ok(PrintRequest::Ignored);
            }
        }
        *self.shared.point.lock() = Some(point);
        self.start(point, PrintEvent::Requested)
    }

    /// Re-run the full sequence with the retained point. Only meaningful
    /// from the `error` state; otherwise the request is ignored. Like
    /// [`request_print`](Self::request_print), requires a tokio runtime.
    pub fn retry_print(&self) -> FloodMapResult<PrintRequest> {
        let point = {
            let state = self.shared.state.lock();
            if !state.is_error() {
                debug!(state = %*state, "Retry requested outside error state - ignoring");
                return Ok(PrintRequest::Ignored);
            }
            drop(state);
            self.shared.point.lock().ok_or_else(|| {
                FloodMapError::Internal("No retained point to retry print for".to_string())
            })?
        };
        self.start(point, PrintEvent::RetryRequested)
    }

    fn start(&self, point: Point, event: PrintEvent) -> FloodMapResult<PrintRequest> {
        // Any previous job handle is discarded before a new sequence begins
        self.cancel_in_flight();
        self.shared.apply(&event)?;

        let workflow_id = Uuid::new_v4();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let shared = Arc::clone(&self.shared);

        let handle = tokio::spawn(async move {
            info!(
                workflow_id = %workflow_id,
                latitude = point.latitude,
                longitude = point.longitude,
                "Starting print workflow"
            );

            match shared.client.run_to_completion(point, &flag).await {
                Ok(artifact) => {
                    *shared.artifact.lock() = Some(artifact);
                    if let Err(error) = shared.apply(&PrintEvent::Succeeded) {
                        warn!(workflow_id = %workflow_id, error = %error, "Print success transition rejected");
                    }
                }
                Err(error) => {
                    warn!(
                        workflow_id = %workflow_id,
                        kind = error.kind(),
                        error = %error,
                        "Print workflow failed"
                    );
                    if let Err(error) = shared.apply(&PrintEvent::Failed(error.to_string())) {
                        warn!(workflow_id = %workflow_id, error = %error, "Print failure transition rejected");
                    }
                }
            }
        });

        *self.workflow.lock() = Some(Workflow { cancelled, handle });
        Ok(PrintRequest::Started)
    }

    /// Cancel and discard the in-flight workflow, if any. Used on teardown
    /// and when a retry supersedes a previous job handle.
    ///
    /// A workflow cancelled while `printing` returns the machine to `ready`;
    /// otherwise no live job exists and the state is left alone.
    pub fn cancel_in_flight(&self) {
        if let Some(workflow) = self.workflow.lock().take() {
            workflow.cancelled.store(true, Ordering::SeqCst);
            workflow.handle.abort();
            let busy = self.shared.state.lock().is_busy();
            if busy {
                if let Err(error) = self.shared.apply(&PrintEvent::Cancelled) {
                    warn!(error = %error, "Print cancel transition rejected");
                }
            }
        }
    }

    pub fn state(&self) -> PrintState {
        *self.shared.state.lock()
    }

    /// Artifact location of the last successful print.
    pub fn artifact(&self) -> Option<ArtifactLocation> {
        self.shared.artifact.lock().clone()
    }

    /// Subject of the last print request, retained to support retry.
    pub fn retained_point(&self) -> Option<Point> {
        *self.shared.point.lock()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange<PrintState>> {
        self.shared.notifier.subscribe()
    }
}

impl Drop for PrintStateMachine {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

impl PrintShared {
    /// Apply an event to the current state and publish the transition.
    fn apply(&self, event: &PrintEvent) -> FloodMapResult<PrintState> {
        let mut state = self.state.lock();
        let from = *state;
        let to = Self::determine_target_state(from, event)?;
        *state = to;
        drop(state);

        info!(
            from = %from,
            to = %to,
            event = event.event_type(),
            "Print state transition"
        );
        self.notifier.publish(from, to);
        Ok(to)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        current_state: PrintState,
        event: &PrintEvent,
    ) -> FloodMapResult<PrintState> {
        let target = match (current_state, event) {
            (
                PrintState::Ready | PrintState::Printed | PrintState::Error,
                PrintEvent::Requested,
            ) => PrintState::Printing,
            (PrintState::Error, PrintEvent::RetryRequested) => PrintState::Printing,
            (PrintState::Printing, PrintEvent::Succeeded) => PrintState::Printed,
            (PrintState::Printing, PrintEvent::Failed(_)) => PrintState::Error,
            (PrintState::Printing, PrintEvent::Cancelled) => PrintState::Ready,
            (from, event) => {
                return Err(FloodMapError::InvalidTransition {
                    from: from.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(
            PrintShared::determine_target_state(PrintState::Ready, &PrintEvent::Requested)
                .unwrap(),
            PrintState::Printing
        );
        assert_eq!(
            PrintShared::determine_target_state(PrintState::Printed, &PrintEvent::Requested)
                .unwrap(),
            PrintState::Printing
        );
        assert_eq!(
            PrintShared::determine_target_state(PrintState::Error, &PrintEvent::RetryRequested)
                .unwrap(),
            PrintState::Printing
        );
        assert_eq!(
            PrintShared::determine_target_state(PrintState::Printing, &PrintEvent::Succeeded)
                .unwrap(),
            PrintState::Printed
        );
        assert_eq!(
            PrintShared::determine_target_state(
                PrintState::Printing,
                &PrintEvent::Failed("boom".to_string())
            )
            .unwrap(),
            PrintState::Error
        );
        assert_eq!(
            PrintShared::determine_target_state(PrintState::Printing, &PrintEvent::Cancelled)
                .unwrap(),
            PrintState::Ready
        );
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        assert!(PrintShared::determine_target_state(
            PrintState::Ready,
            &PrintEvent::RetryRequested
        )
        .is_err());
        assert!(PrintShared::determine_target_state(
            PrintState::Printing,
            &PrintEvent::Requested
        )
        .is_err());
        assert!(
            PrintShared::determine_target_state(PrintState::Ready, &PrintEvent::Cancelled)
                .is_err()
        );
    }
}
