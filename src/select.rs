//! Select photos by area or chronology.
//!
//! Both selections borrow from the caller's snapshot and return references,
//! so they compose with grouping without copying photo records.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, Photo};

/// An axis-aligned bounding box in decimal degrees. All edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat_deg: f64,
    pub max_lat_deg: f64,
    pub min_lon_deg: f64,
    pub max_lon_deg: f64,
}

impl GeoBounds {
    pub fn new(min_lat_deg: f64, max_lat_deg: f64, min_lon_deg: f64, max_lon_deg: f64) -> Self {
        Self {
            min_lat_deg,
            max_lat_deg,
            min_lon_deg,
            max_lon_deg,
        }
    }

    /// True when `point` lies inside the box, edges included.
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat_deg >= self.min_lat_deg
            && point.lat_deg <= self.max_lat_deg
            && point.lon_deg >= self.min_lon_deg
            && point.lon_deg <= self.max_lon_deg
    }
}

/// Geotagged photos inside `bounds`, in input order.
///
/// Photos without coordinates never match.
pub fn photos_in_area<'a>(photos: &'a [Photo], bounds: &GeoBounds) -> Vec<&'a Photo> {
    photos
        .iter()
        .filter(|p| p.coords.is_some_and(|c| bounds.contains(c)))
        .collect()
}

/// Geotagged, dated photos in chronological order.
///
/// This is the polyline path for a travel timeline view: photos missing
/// either coordinates or a timestamp are excluded, and photos sharing a
/// timestamp keep their input order.
pub fn timeline(photos: &[Photo]) -> Vec<&Photo> {
    let mut dated: Vec<&Photo> = photos
        .iter()
        .filter(|p| p.coords.is_some() && p.timestamp.is_some())
        .collect();
    dated.sort_by_key(|p| p.timestamp);
    dated
}
