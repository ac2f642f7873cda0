use serde::{Deserialize, Serialize};

/// The aggregated per-point result consumed read-only by the view layer.
///
/// All fields are display-ready strings. The record is replaced wholesale at
/// the end of a successful query cycle, never patched field by field, so a
/// reader can never observe a half-updated record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoRecord {
    /// Latitude in decimal degrees, five decimal places.
    pub latitude: String,
    /// Longitude in decimal degrees, five decimal places.
    pub longitude: String,
    /// Elevation in feet, two decimal places with a `feet` suffix.
    pub elevation: String,
    /// Cadastral section label.
    pub section: String,
    /// County name.
    pub county: String,
    /// Flood zone label, e.g. `Flood Zone X` or `Flood AE`.
    pub zone: String,
    /// Free-text hazard description for the zone.
    pub description: String,
    /// FIRM panel identifier; empty when not applicable.
    pub firm: String,
    /// Floodplain-jurisdiction name.
    pub jurisdiction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = InfoRecord::default();
        assert_eq!(record.latitude, "");
        assert_eq!(record.zone, "");
        assert_eq!(record.firm, "");
    }
}
