//! Point-in-region gate for the serviceable area.

use crate::models::Point;

/// Black-box containment predicate over the service-area region.
///
/// The region polygon is loaded once at startup by an external collaborator;
/// the core only ever asks it whether a point is inside. Containment math is
/// the implementor's concern.
pub trait Boundary: Send + Sync {
    fn contains(&self, point: &Point) -> bool;
}

/// Axis-aligned lat/lon extent. Sufficient for tests and for callers whose
/// service area is rectangular; polygonal regions implement [`Boundary`]
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentBoundary {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Boundary for ExtentBoundary {
    fn contains(&self, point: &Point) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

/// Pure, synchronous gate with no state and no failure modes. A malformed
/// point or region is a precondition violation handled by the caller.
pub struct GeofenceGate;

impl GeofenceGate {
    pub fn accepts(region: &dyn Boundary, point: &Point) -> bool {
        region.contains(point)
    }
}
