use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::events::QueryEvent;
use super::notify::{StateChange, StateNotifier};
use super::states::QueryState;
use crate::aggregator::SpatialQueryAggregator;
use crate::error::{FloodMapError, FloodMapResult};
use crate::geofence::{Boundary, GeofenceGate};
use crate::models::{InfoRecord, Point};

/// How a query request resolved, beyond the state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Aggregation completed and the info record was replaced.
    Completed(InfoRecord),
    /// The point fell outside the service boundary; nothing was queried.
    OutsideBoundary,
    /// A cycle was already in flight; the request was dropped, not queued.
    Dropped,
}

/// Supervises one query-and-display cycle per session.
///
/// The machine owns the session's single `InfoRecord` and its state. A new
/// request while `querying` is dropped; a failed aggregation reverts to
/// `ready` leaving the previous record in place; a successful one replaces
/// the record at the join and, after a settling delay, exposes state `info`.
pub struct QueryStateMachine {
    boundary: Arc<dyn Boundary>,
    aggregator: SpatialQueryAggregator,
    settling_delay: Duration,
    state: Mutex<QueryState>,
    info: Mutex<InfoRecord>,
    info_point: Mutex<Option<Point>>,
    notifier: StateNotifier<QueryState>,
}

impl QueryStateMachine {
    pub fn new(
        boundary: Arc<dyn Boundary>,
        aggregator: SpatialQueryAggregator,
        settling_delay: Duration,
    ) -> Self {
        Self {
            boundary,
            aggregator,
            settling_delay,
            state: Mutex::new(QueryState::default()),
            info: Mutex::new(InfoRecord::default()),
            info_point: Mutex::new(None),
            notifier: StateNotifier::default(),
        }
    }

    /// Run one query cycle for `point`.
    ///
    /// Returns `Dropped` without side effects when a cycle is already in
    /// flight, `OutsideBoundary` when the geofence gate rejects the point,
    /// and the new record on success. Aggregation failures are surfaced to
    /// the caller after the machine reverts to `ready`.
    pub async fn request_query(&self, point: Point) -> FloodMapResult<QueryOutcome> {
        {
            let mut state = self.state.lock();
            if state.is_busy() {
                debug!(state = %*state, "Query cycle already in flight - dropping request");
                return Ok(QueryOutcome::Dropped);
            }
            let from = *state;
            *state = QueryState::Querying;
            drop(state);
            self.log_transition(from, QueryState::Querying, &QueryEvent::Requested);
        }

        if !GeofenceGate::accepts(self.boundary.as_ref(), &point) {
            debug!(
                latitude = point.latitude,
                longitude = point.longitude,
                "Point outside service boundary"
            );
            self.apply(&QueryEvent::BoundaryRejected)?;
            return Ok(QueryOutcome::OutsideBoundary);
        }

        match self.aggregator.query(point).await {
            Ok(record) => {
                {
                    *self.info.lock() = record.clone();
                    *self.info_point.lock() = Some(point);
                }
                // Let any overlay or modal resolve before the info panel
                // state becomes externally visible.
                tokio::time::sleep(self.settling_delay).await;
                self.apply(&QueryEvent::Succeeded)?;
                Ok(QueryOutcome::Completed(record))
            }
            Err(error) => {
                warn!(
                    kind = error.kind(),
                    error = %error,
                    "Spatial query aggregation failed - reverting to ready"
                );
                self.apply(&QueryEvent::Failed(error.to_string()))?;
                Err(error)
            }
        }
    }

    pub fn state(&self) -> QueryState {
        *self.state.lock()
    }

    /// The current info record. Stale only in the sense that a failed cycle
    /// leaves the previous record in place.
    pub fn info(&self) -> InfoRecord {
        self.info.lock().clone()
    }

    /// Subject of the last successful query, retained for the print workflow.
    pub fn info_point(&self) -> Option<Point> {
        *self.info_point.lock()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange<QueryState>> {
        self.notifier.subscribe()
    }

    /// Apply an event to the current state and publish the transition.
    fn apply(&self, event: &QueryEvent) -> FloodMapResult<QueryState> {
        let mut state = self.state.lock();
        let from = *state;
        let to = Self::determine_target_state(from, event)?;
        *state = to;
        drop(state);
        self.log_transition(from, to, event);
        Ok(to)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        current_state: QueryState,
        event: &QueryEvent,
    ) -> FloodMapResult<QueryState> {
        let target = match (current_state, event) {
            (QueryState::Ready | QueryState::Info, QueryEvent::Requested) => QueryState::Querying,
            (QueryState::Querying, QueryEvent::BoundaryRejected) => QueryState::Ready,
            (QueryState::Querying, QueryEvent::Succeeded) => QueryState::Info,
            (QueryState::Querying, QueryEvent::Failed(_)) => QueryState::Ready,
            (from, event) => {
                return Err(FloodMapError::InvalidTransition {
                    from: from.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }

    fn log_transition(&self, from: QueryState, to: QueryState, event: &QueryEvent) {
        info!(
            from = %from,
            to = %to,
            event = event.event_type(),
            "Query state transition"
        );
        self.notifier.publish(from, to);
    }
}
