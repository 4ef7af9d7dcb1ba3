//! The normalized photo record consumed by the grouping engine.
//!
//! A `Photo` is what comes out of the ingestion boundary: coordinates and
//! timestamp are already strongly typed and optional. The engine never sees
//! raw EXIF metadata.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::GeoPoint;

/// A photograph with normalized metadata.
///
/// Coordinates are a single optional [`GeoPoint`], so latitude and longitude
/// are either both present or both absent. Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Storage identifier assigned by the hosting application.
    pub id: i64,
    /// GPS position, if the source image carried one.
    pub coords: Option<GeoPoint>,
    /// Capture time, if the source image carried one.
    #[serde(with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    /// Display title, typically the original filename stem.
    pub title: String,
    /// Stored filename on disk.
    pub filename: String,
    /// Public access URL for rendering.
    pub url: String,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
