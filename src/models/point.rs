use serde::{Deserialize, Serialize};

/// A geographic point with its projected counterpart.
///
/// Latitude and longitude are decimal degrees. `x`/`y` are the same location
/// in the projected coordinate system the remote services transact in
/// (Web Mercator, wkid 102100); projection happens on the caller's side.
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64, x: f64, y: f64) -> Self {
        Self {
            latitude,
            longitude,
            x,
            y,
        }
    }
}
