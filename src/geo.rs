//! Distance utilities over decimal-degree coordinates.
//!
//! Two distance measures live here and they are deliberately different:
//!
//! - [`planar_distance_deg`] treats latitude and longitude as a flat plane
//!   and returns the Euclidean norm of the raw degree deltas. At city scale
//!   the degree-to-meter distortion is roughly uniform, so this is good
//!   enough for thresholding and is what the clustering and landmark
//!   resolution paths use internally. It is never surfaced to users.
//! - [`haversine_distance_m`] is the true great-circle distance over a
//!   spherical Earth model, in meters. This is the one to report to users.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the Haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A coordinate pair in decimal degrees.
///
/// Positive latitude is north, positive longitude is east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Planar approximate distance between two points, in degrees.
///
/// Euclidean norm of the raw degree-space deltas. Valid only at city scale.
pub fn planar_distance_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    Vector2::new(b.lat_deg - a.lat_deg, b.lon_deg - a.lon_deg).norm()
}

/// Great-circle distance between two points, in meters.
///
/// Haversine half-angle formula on a sphere of radius [`EARTH_RADIUS_M`],
/// using the `2·atan2(√a, √(1−a))` central-angle form.
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dphi = (b.lat_deg - a.lat_deg).to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}
