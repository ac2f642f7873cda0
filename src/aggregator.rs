//! Fan-out/fan-in aggregation of per-point spatial lookups.
//!
//! One query cycle issues every attribute layer query plus the elevation
//! lookup concurrently, joins on completion of all of them, and applies the
//! flood-hazard business rules to assemble a single [`InfoRecord`]. The join
//! is all-or-nothing: any rejection fails the whole cycle and no partial
//! record is ever surfaced.

use std::sync::Arc;

use tracing::debug;

use crate::error::{FloodMapError, FloodMapResult};
use crate::models::{ElevationResult, FeatureSet, InfoRecord, LayerRole, LayerSet, Point};
use crate::services::{ElevationService, LayerQueryService};

pub const METERS_TO_FEET: f64 = 3.28084;

/// Zone label used when the flood-zone layer has no matching feature.
pub const DEFAULT_ZONE: &str = "Flood Zone X";
pub const DEFAULT_ZONE_DESCRIPTION: &str = "Area of Minimal Flood Risk";

const ZONE_DESCRIPTION_FIELD: &str = "desc";
const CLATSOP_COUNTY: &str = "Clatsop County";
const COLUMBIA_COUNTY: &str = "Columbia County";

pub(crate) fn format_elevation(z_meters: f64) -> String {
    format!("{:.2} feet", z_meters * METERS_TO_FEET)
}

/// Runs the concurrent lookups for one accepted point and builds the record.
pub struct SpatialQueryAggregator {
    layers: Arc<dyn LayerQueryService>,
    elevation: Arc<dyn ElevationService>,
    layer_set: LayerSet,
}

impl SpatialQueryAggregator {
    pub fn new(layers: Arc<dyn LayerQueryService>, elevation: Arc<dyn ElevationService>) -> Self {
        Self::with_layer_set(layers, elevation, LayerSet::standard())
    }

    pub fn with_layer_set(
        layers: Arc<dyn LayerQueryService>,
        elevation: Arc<dyn ElevationService>,
        layer_set: LayerSet,
    ) -> Self {
        Self {
            layers,
            elevation,
            layer_set,
        }
    }

    /// Query every layer plus elevation for `point` and assemble the record.
    ///
    /// All calls are issued before any result is awaited. The first rejection
    /// propagates immediately; sibling calls already in flight are left to
    /// finish on their own tasks and their late results are discarded.
    pub async fn query(&self, point: Point) -> FloodMapResult<InfoRecord> {
        debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            layer_count = self.layer_set.len(),
            "Issuing spatial query fan-out"
        );

        let mut handles = Vec::with_capacity(self.layer_set.len());
        for spec in self.layer_set.specs() {
            let service = Arc::clone(&self.layers);
            let spec = spec.clone();
            handles.push(tokio::spawn(async move {
                service.query_features(&spec, point).await
            }));
        }
        let elevation_handle = {
            let service = Arc::clone(&self.elevation);
            tokio::spawn(async move { service.query_elevation(point).await })
        };

        let layer_results = futures::future::try_join_all(handles.into_iter().map(
            |handle| async move {
                handle
                    .await
                    .map_err(|e| FloodMapError::Internal(format!("Layer query task failed: {e}")))?
            },
        ));
        let elevation_result = async move {
            elevation_handle
                .await
                .map_err(|e| FloodMapError::Internal(format!("Elevation task failed: {e}")))?
        };

        let (feature_sets, elevation) = tokio::try_join!(layer_results, elevation_result)?;

        self.assemble(point, &feature_sets, elevation)
    }

    /// Business rules for building the record from settled results.
    fn assemble(
        &self,
        point: Point,
        sets: &[FeatureSet],
        elevation: ElevationResult,
    ) -> FloodMapResult<InfoRecord> {
        let county = self.required_attribute(sets, LayerRole::County)?;
        let section = self.required_attribute(sets, LayerRole::Section)?;
        let jurisdiction = self.required_attribute(sets, LayerRole::Jurisdiction)?;

        let mut record = InfoRecord {
            latitude: format!("{:.5}", point.latitude),
            longitude: format!("{:.5}", point.longitude),
            elevation: format_elevation(elevation.z),
            section,
            county,
            zone: DEFAULT_ZONE.to_string(),
            description: DEFAULT_ZONE_DESCRIPTION.to_string(),
            firm: String::new(),
            jurisdiction,
        };

        // A matching flood-zone feature overrides the default zone, and only
        // then does a county-specific FIRM panel apply.
        if let Some(zone_feature) = self.set_for(sets, LayerRole::FloodZone)?.first() {
            let zone_spec = self.spec_for(LayerRole::FloodZone)?;
            let zone = zone_feature.attribute_str(zone_spec.out_field).ok_or_else(|| {
                FloodMapError::QueryFailure(format!(
                    "Flood zone feature missing '{}' attribute",
                    zone_spec.out_field
                ))
            })?;
            record.zone = format!("Flood {zone}");
            record.description = zone_feature
                .attribute_str(ZONE_DESCRIPTION_FIELD)
                .unwrap_or(DEFAULT_ZONE_DESCRIPTION)
                .to_string();

            if record.county == CLATSOP_COUNTY {
                record.firm = self.required_attribute(sets, LayerRole::ClatsopFirm)?;
            } else if record.county == COLUMBIA_COUNTY {
                record.firm = self.required_attribute(sets, LayerRole::ColumbiaFirm)?;
            }
        }

        debug!(
            county = %record.county,
            zone = %record.zone,
            firm = %record.firm,
            "Assembled info record"
        );

        Ok(record)
    }

    fn spec_for(&self, role: LayerRole) -> FloodMapResult<&crate::models::LayerQuerySpec> {
        self.layer_set
            .spec_for(role)
            .ok_or_else(|| FloodMapError::Internal(format!("Layer set has no {role} layer")))
    }

    /// Result set for `role`, matched back by the spec's position in the
    /// issue order.
    fn set_for<'a>(&self, sets: &'a [FeatureSet], role: LayerRole) -> FloodMapResult<&'a FeatureSet> {
        let index = self
            .layer_set
            .specs()
            .iter()
            .position(|spec| spec.role == role)
            .ok_or_else(|| FloodMapError::Internal(format!("Layer set has no {role} layer")))?;
        sets.get(index)
            .ok_or_else(|| FloodMapError::Internal(format!("Missing result set for {role} layer")))
    }

    /// Read the configured attribute from the first (and only expected)
    /// matching feature of a layer that must match.
    fn required_attribute(&self, sets: &[FeatureSet], role: LayerRole) -> FloodMapResult<String> {
        let spec = self.spec_for(role)?;
        let feature = self.set_for(sets, role)?.first().ok_or_else(|| {
            FloodMapError::QueryFailure(format!("{role} layer returned no matching feature"))
        })?;
        feature
            .attribute_str(spec.out_field)
            .map(str::to_string)
            .ok_or_else(|| {
                FloodMapError::QueryFailure(format!(
                    "{role} feature missing '{}' attribute",
                    spec.out_field
                ))
            })
    }
}
