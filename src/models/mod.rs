//! Data model for the flood map core.
//!
//! These types are plain data: the [`Point`] a caller supplies, the
//! [`FeatureSet`] results the attribute layers return, the static
//! [`LayerSet`] configuration, and the aggregated [`InfoRecord`] handed to
//! the view layer.

pub mod features;
pub mod info;
pub mod layers;
pub mod point;

pub use features::{ElevationResult, Feature, FeatureSet};
pub use info::InfoRecord;
pub use layers::{LayerQuerySpec, LayerRole, LayerSet};
pub use point::Point;
