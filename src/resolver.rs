//! Match a coordinate against a table of known attractions.
//!
//! The table is small and static, so lookup is a bounded linear scan: the
//! running minimum starts at the caller's maximum distance and a candidate
//! only takes the lead when it is strictly closer. The scan follows table
//! insertion order, so among equally distant candidates the earliest entry
//! wins. Distances are the planar degree-space approximation, which is
//! adequate at the city scale these tables cover.

use serde::{Deserialize, Serialize};

use crate::geo::{planar_distance_deg, GeoPoint};

/// Default maximum match distance in degrees, about 111 m at the equator.
pub const DEFAULT_MAX_DISTANCE_DEG: f64 = 0.001;

/// A known landmark with a fixed position.
///
/// Read-only reference data, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub description: String,
    pub coords: GeoPoint,
}

/// An insertion-ordered table of attractions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttractionTable {
    attractions: Vec<Attraction>,
}

impl AttractionTable {
    /// Build a table from owned attractions, preserving their order.
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self { attractions }
    }

    /// Build a table by cloning attractions from a slice.
    pub fn from_slice(attractions: &[Attraction]) -> Self {
        Self::new(attractions.to_vec())
    }

    /// Number of attractions in the table.
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// True when the table holds no attractions.
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// All attractions in insertion order.
    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    /// Look up an attraction by name.
    pub fn get(&self, name: &str) -> Option<&Attraction> {
        self.attractions.iter().find(|a| a.name == name)
    }

    /// Find the attraction nearest to `target`, if any lies strictly closer
    /// than `max_distance_deg` in planar degree distance.
    ///
    /// The bound is exclusive: a candidate exactly at the threshold is not
    /// a match. Ties between candidates resolve to the earliest table entry.
    pub fn nearest_within(
        &self,
        target: GeoPoint,
        max_distance_deg: f64,
    ) -> Option<&Attraction> {
        let mut min_distance = max_distance_deg;
        let mut nearest = None;

        for attraction in &self.attractions {
            let distance = planar_distance_deg(target, attraction.coords);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(attraction);
            }
        }

        nearest
    }

    /// [`Self::nearest_within`] with the default maximum distance.
    pub fn nearest(&self, target: GeoPoint) -> Option<&Attraction> {
        self.nearest_within(target, DEFAULT_MAX_DISTANCE_DEG)
    }
}
