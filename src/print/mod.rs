//! Print job workflow: submit a FIRMette generation job to the remote
//! geoprocessing service, poll it to a terminal status, and resolve the
//! downloadable artifact location.

pub mod client;
pub mod job;
pub mod transport;

pub use client::PrintJobClient;
pub use job::{
    ArtifactLocation, JobHandle, JobResultResponse, JobResults, JobStatusResponse, PrintJobStatus,
};
pub use transport::{HttpPrintJobTransport, PrintJobTransport, PrintServiceConfig};
