//! Wire types for the geoprocessing print job service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::Point;

/// Fixed print-type selector sent with every submission.
pub const PRINT_TYPE: &str = "FIRMETTE";
/// Output format selector for the generated document.
pub const OUTPUT_FORMAT: &str = "PDF";
/// Name of the job output parameter carrying the artifact reference.
pub const OUTPUT_PARAM: &str = "OutputFile";
/// Projected coordinate system the service transacts in.
pub const WEB_MERCATOR_WKID: u32 = 102100;

const STATUS_SUBMITTED: &str = "esriJobSubmitted";
const STATUS_EXECUTING: &str = "esriJobExecuting";
const STATUS_SUCCEEDED: &str = "esriJobSucceeded";

/// Job status as reported by the service.
///
/// `Submitted` and `Executing` are the only recognized non-terminal values;
/// any unrecognized wire value is treated as a failure and carried verbatim
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrintJobStatus {
    Submitted,
    Executing,
    Succeeded,
    Failed(String),
}

impl PrintJobStatus {
    /// Check if no further polling should occur in this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Submitted => STATUS_SUBMITTED,
            Self::Executing => STATUS_EXECUTING,
            Self::Succeeded => STATUS_SUCCEEDED,
            Self::Failed(raw) => raw,
        }
    }
}

impl From<&str> for PrintJobStatus {
    fn from(value: &str) -> Self {
        match value {
            STATUS_SUBMITTED => Self::Submitted,
            STATUS_EXECUTING => Self::Executing,
            STATUS_SUCCEEDED => Self::Succeeded,
            other => Self::Failed(other.to_string()),
        }
    }
}

impl fmt::Display for PrintJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl Serialize for PrintJobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for PrintJobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Identifier and last known status of a submitted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "jobStatus")]
    pub status: PrintJobStatus,
}

/// One status poll response. `results` is populated once the job succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusResponse {
    #[serde(rename = "jobId", default)]
    pub job_id: String,
    #[serde(rename = "jobStatus")]
    pub status: PrintJobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<JobResults>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResults {
    #[serde(rename = "OutputFile", default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<JobOutputParam>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutputParam {
    #[serde(rename = "paramUrl")]
    pub param_url: String,
}

/// Response of resolving an output parameter into a final URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResultResponse {
    pub value: JobResultValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResultValue {
    pub url: String,
}

/// Final, downloadable location of the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLocation {
    url: String,
}

impl ArtifactLocation {
    /// Normalize the scheme to secure transport; the service is known to
    /// hand back plain-http URLs.
    pub fn secure(url: String) -> Self {
        let url = match url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => url,
        };
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Feature-collection payload carried by a job submission: the single
/// point to print, in projected coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "geometryType")]
    geometry_type: &'static str,
    features: Vec<FcFeature>,
    sr: SpatialReference,
}

#[derive(Debug, Clone, Serialize)]
struct FcFeature {
    geometry: FcGeometry,
}

#[derive(Debug, Clone, Serialize)]
struct FcGeometry {
    x: f64,
    y: f64,
    #[serde(rename = "spatialReference")]
    spatial_reference: SpatialReference,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpatialReference {
    wkid: u32,
}

impl FeatureCollection {
    pub fn for_point(point: Point) -> Self {
        let sr = SpatialReference {
            wkid: WEB_MERCATOR_WKID,
        };
        Self {
            geometry_type: "esriGeometryPoint",
            features: vec![FcFeature {
                geometry: FcGeometry {
                    x: point.x,
                    y: point.y,
                    spatial_reference: sr,
                },
            }],
            sr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_parsing() {
        assert_eq!(
            PrintJobStatus::from("esriJobSubmitted"),
            PrintJobStatus::Submitted
        );
        assert_eq!(
            PrintJobStatus::from("esriJobExecuting"),
            PrintJobStatus::Executing
        );
        assert_eq!(
            PrintJobStatus::from("esriJobSucceeded"),
            PrintJobStatus::Succeeded
        );
        // Anything else is the implicit failure bucket
        assert_eq!(
            PrintJobStatus::from("esriJobFailed"),
            PrintJobStatus::Failed("esriJobFailed".to_string())
        );
        assert_eq!(
            PrintJobStatus::from("esriJobCancelled"),
            PrintJobStatus::Failed("esriJobCancelled".to_string())
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!PrintJobStatus::Submitted.is_terminal());
        assert!(!PrintJobStatus::Executing.is_terminal());
        assert!(PrintJobStatus::Succeeded.is_terminal());
        assert!(PrintJobStatus::Failed("x".to_string()).is_terminal());
    }

    #[test]
    fn test_job_handle_deserialization() {
        let response = json!({
            "jobId": "j4fa1db812f7e4f33a04fa1f927e47218",
            "jobStatus": "esriJobSubmitted"
        });
        let handle: JobHandle = serde_json::from_value(response).unwrap();
        assert_eq!(handle.job_id, "j4fa1db812f7e4f33a04fa1f927e47218");
        assert_eq!(handle.status, PrintJobStatus::Submitted);
    }

    #[test]
    fn test_status_response_with_results() {
        let response = json!({
            "jobId": "j1",
            "jobStatus": "esriJobSucceeded",
            "results": {
                "OutputFile": { "paramUrl": "results/OutputFile" }
            }
        });
        let status: JobStatusResponse = serde_json::from_value(response).unwrap();
        assert_eq!(status.status, PrintJobStatus::Succeeded);
        assert_eq!(
            status.results.unwrap().output_file.unwrap().param_url,
            "results/OutputFile"
        );
    }

    #[test]
    fn test_artifact_scheme_normalization() {
        let artifact =
            ArtifactLocation::secure("http://msc.fema.gov/output/FIRMETTE_123.pdf".to_string());
        assert_eq!(artifact.url(), "https://msc.fema.gov/output/FIRMETTE_123.pdf");

        let already_secure =
            ArtifactLocation::secure("https://msc.fema.gov/output/x.pdf".to_string());
        assert_eq!(already_secure.url(), "https://msc.fema.gov/output/x.pdf");
    }

    #[test]
    fn test_feature_collection_shape() {
        let point = Point::new(45.857, -123.193, -13713716.0, 5760295.0);
        let fc = FeatureCollection::for_point(point);
        let value = serde_json::to_value(&fc).unwrap();
        assert_eq!(value["geometryType"], "esriGeometryPoint");
        assert_eq!(value["sr"]["wkid"], 102100);
        assert_eq!(value["features"][0]["geometry"]["x"], -13713716.0);
        assert_eq!(value["features"][0]["geometry"]["y"], 5760295.0);
        assert_eq!(
            value["features"][0]["geometry"]["spatialReference"]["wkid"],
            102100
        );
    }
}
