//! Collaborator contracts consumed by the core.
//!
//! The concrete map SDK sits behind these traits: an attribute layer query
//! service and an elevation lookup. The core never touches geometry beyond
//! passing the point through.

use async_trait::async_trait;

use crate::error::FloodMapResult;
use crate::models::{ElevationResult, FeatureSet, LayerQuerySpec, Point};

/// Queries one attribute layer for the features containing a point.
///
/// Implementations return features in service order with an attribute map
/// per feature; an empty set means "no match" and triggers the default-zone
/// rule downstream.
#[async_trait]
pub trait LayerQueryService: Send + Sync {
    async fn query_features(
        &self,
        spec: &LayerQuerySpec,
        point: Point,
    ) -> FloodMapResult<FeatureSet>;
}

/// Resolves the ground elevation at a point. The z value is meters.
#[async_trait]
pub trait ElevationService: Send + Sync {
    async fn query_elevation(&self, point: Point) -> FloodMapResult<ElevationResult>;
}
