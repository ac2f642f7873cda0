use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a queryable attribute layer plays in assembling the info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    /// Floodplain management jurisdiction polygons.
    Jurisdiction,
    /// Cadastral section polygons.
    Section,
    /// County boundary polygons.
    County,
    /// Drainage basin boundary.
    Basin,
    /// Flood hazard zone polygons.
    FloodZone,
    /// Stream profile lines.
    StreamProfile,
    /// Cross section lines.
    CrossSection,
    /// Base flood elevation lines.
    BaseFloodElevation,
    /// Columbia County FIRM panel index.
    ColumbiaFirm,
    /// Clatsop County FIRM panel index.
    ClatsopFirm,
    /// Reference places.
    Places,
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Jurisdiction => "jurisdiction",
            Self::Section => "section",
            Self::County => "county",
            Self::Basin => "basin",
            Self::FloodZone => "flood_zone",
            Self::StreamProfile => "stream_profile",
            Self::CrossSection => "cross_section",
            Self::BaseFloodElevation => "base_flood_elevation",
            Self::ColumbiaFirm => "columbia_firm",
            Self::ClatsopFirm => "clatsop_firm",
            Self::Places => "places",
        };
        write!(f, "{label}")
    }
}

/// Static description of one queryable attribute layer: its stable sublayer
/// id, a human title, its role, and the attribute field the aggregation
/// rules read from its features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerQuerySpec {
    pub id: u32,
    pub title: &'static str,
    pub role: LayerRole,
    pub out_field: &'static str,
}

/// The fixed, ordered collection of layer specs one query cycle fans out
/// over. The order is the issue order; results are matched back by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSet {
    specs: Vec<LayerQuerySpec>,
}

impl LayerSet {
    /// The production layer configuration of the flood map service.
    pub fn standard() -> Self {
        Self {
            specs: vec![
                LayerQuerySpec {
                    id: 22,
                    title: "Floodplain Jurisdiction",
                    role: LayerRole::Jurisdiction,
                    out_field: "name",
                },
                LayerQuerySpec {
                    id: 21,
                    title: "Sections",
                    role: LayerRole::Section,
                    out_field: "LABEL",
                },
                LayerQuerySpec {
                    id: 20,
                    title: "County Boundaries",
                    role: LayerRole::County,
                    out_field: "instName",
                },
                LayerQuerySpec {
                    id: 2,
                    title: "Upper Nehalem Basin",
                    role: LayerRole::Basin,
                    out_field: "name",
                },
                LayerQuerySpec {
                    id: 3,
                    title: "Flood Zones",
                    role: LayerRole::FloodZone,
                    out_field: "zone",
                },
                LayerQuerySpec {
                    id: 12,
                    title: "Stream Profiles",
                    role: LayerRole::StreamProfile,
                    out_field: "LABEL",
                },
                LayerQuerySpec {
                    id: 11,
                    title: "Cross Sections",
                    role: LayerRole::CrossSection,
                    out_field: "LABEL",
                },
                LayerQuerySpec {
                    id: 10,
                    title: "Base Flood Elevations",
                    role: LayerRole::BaseFloodElevation,
                    out_field: "ELEV",
                },
                LayerQuerySpec {
                    id: 6,
                    title: "Columbia County FIRM Panels",
                    role: LayerRole::ColumbiaFirm,
                    out_field: "FIRM_PAN",
                },
                LayerQuerySpec {
                    id: 5,
                    title: "Clatsop County FIRM Panels",
                    role: LayerRole::ClatsopFirm,
                    out_field: "FIRM_PAN",
                },
                LayerQuerySpec {
                    id: 13,
                    title: "Places",
                    role: LayerRole::Places,
                    out_field: "name",
                },
            ],
        }
    }

    pub fn specs(&self) -> &[LayerQuerySpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec_for(&self, role: LayerRole) -> Option<&LayerQuerySpec> {
        self.specs.iter().find(|spec| spec.role == role)
    }
}
