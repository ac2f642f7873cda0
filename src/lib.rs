//! # FloodMap Core
//!
//! Session-scoped orchestration for flood hazard map queries and FIRMette
//! print jobs against ArcGIS-style feature and geoprocessing services.
//!
//! ## Architecture
//!
//! - **Geofence gate**: point-in-boundary check that rejects clicks outside
//!   the service area before any network work starts
//! - **Spatial query aggregator**: concurrent fan-out of per-layer attribute
//!   queries plus an elevation query, joined all-or-nothing into a single
//!   flood information record
//! - **Query state machine**: `ready` / `querying` / `info` lifecycle with
//!   re-entrancy protection and broadcast state-change notifications
//! - **Print job client**: submit / poll / fetch-result sequence against the
//!   FIRMette geoprocessing endpoint, with bounded cancellable polling
//! - **Print state machine**: `ready` / `printing` / `printed` / `error`
//!   lifecycle with point retention for retry
//!
//! ## Key Modules
//!
//! - [`geofence`]: boundary trait and the gate itself
//! - [`aggregator`]: layer fan-out and record assembly rules
//! - [`state_machine`]: states, events, transitions, notifications
//! - [`print`]: job wire types, HTTP transport, polling client
//! - [`models`]: points, features, layer catalog, the info record
//! - [`config`]: environment-driven service configuration

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod geofence;
pub mod logging;
pub mod models;
pub mod print;
pub mod services;
pub mod state_machine;

pub use aggregator::SpatialQueryAggregator;
pub use config::FloodMapConfig;
pub use error::{FloodMapError, FloodMapResult};
pub use geofence::{Boundary, ExtentBoundary, GeofenceGate};
pub use models::{ElevationResult, Feature, FeatureSet, InfoRecord, LayerQuerySpec, LayerRole, LayerSet, Point};
pub use print::{ArtifactLocation, HttpPrintJobTransport, PrintJobClient, PrintJobTransport, PrintServiceConfig};
pub use services::{ElevationService, LayerQueryService};
pub use state_machine::{
    PrintEvent, PrintRequest, PrintState, PrintStateMachine, QueryEvent, QueryOutcome, QueryState,
    QueryStateMachine, StateChange, StateNotifier,
};
