//! # photomap
//!
//! A geospatial **photo clustering and landmark resolution** engine.
//!
//! Given an unordered collection of geotagged photographs, `photomap` turns
//! them into stable visual groups anchored to map locations, then matches
//! each group against a table of known landmarks for captioning. The engine
//! is the algorithmic core of a photo-map application: upload handling,
//! EXIF binary parsing, persistence, and rendering are external
//! collaborators that feed it normalized [`Photo`] records and consume the
//! resulting [`PhotoGroup`]s and resolved landmark names.
//!
//! ## Features
//!
//! - **Proximity grouping** — single-pass greedy clustering with online
//!   centroid maintenance and recency-based thumbnail selection
//! - **Landmark resolution** — bounded nearest-neighbor search over a
//!   static attraction table, with the Rome table built in
//! - **Dual distance measures** — planar degree-space approximation for
//!   thresholding, Haversine meters for user-facing reporting
//! - **Typed ingestion boundary** — hemisphere-aware GPS sign resolution
//!   and EXIF timestamp parsing happen once, at the edge
//! - **Pure core** — grouping and resolution are total functions of their
//!   input snapshot; concurrent callers just bring their own snapshots
//!
//! ## Example
//!
//! ```
//! use photomap::ingest::{photo_from_exif, ExifSummary};
//! use photomap::{catalog, group_photos_by_location, GroupingConfig};
//! use time::macros::datetime;
//!
//! // Normalized at the ingestion boundary from an EXIF extractor's output
//! let exif = ExifSummary {
//!     gps_latitude: Some(41.8902),
//!     gps_latitude_ref: Some("N".to_string()),
//!     gps_longitude: Some(12.4922),
//!     gps_longitude_ref: Some("E".to_string()),
//!     date_time_original: Some("2024:06:01 10:15:00".to_string()),
//!     ..Default::default()
//! };
//! let photo = photo_from_exif(
//!     1,
//!     "colosseo.jpg",
//!     "ab12cd34.jpg",
//!     &exif,
//!     datetime!(2024-06-01 12:00:00 UTC),
//! );
//!
//! // Group by proximity, then caption the group by its nearest landmark
//! let groups = group_photos_by_location(&[photo], &GroupingConfig::default());
//! assert_eq!(groups.len(), 1);
//!
//! let rome = catalog::rome();
//! let hit = rome.nearest(groups[0].centroid());
//! assert_eq!(hit.map(|a| a.name.as_str()), Some("Colosseum"));
//! ```
//!
//! ## Algorithm overview
//!
//! 1. **Normalize** — drop photos without coordinates, sort the rest most
//!    recent first (undated photos last, stable)
//! 2. **Group** — fold over the photos, testing each against existing
//!    groups in creation order with a per-axis degree tolerance box; first
//!    match absorbs the photo and recomputes the centroid, no match founds
//!    a new group
//! 3. **Resolve** — per group centroid, linear-scan the attraction table
//!    and keep the strictly closest candidate inside the threshold
//!
//! Grouping is O(n·g) for n photos and g groups (worst case O(n²) when
//! every photo founds its own group); there is no spatial index, by design.
//! Groups are recomputed from the full snapshot whenever the photo set
//! changes, so group identity is not persistent across runs.

pub mod catalog;
mod cluster;
mod geo;
pub mod ingest;
mod photo;
mod resolver;
mod select;

pub use cluster::{group_photos_by_location, GroupingConfig, PhotoGroup, DEFAULT_TOLERANCE_DEG};
pub use geo::{haversine_distance_m, planar_distance_deg, GeoPoint, EARTH_RADIUS_M};
pub use photo::Photo;
pub use resolver::{Attraction, AttractionTable, DEFAULT_MAX_DISTANCE_DEG};
pub use select::{photos_in_area, timeline, GeoBounds};
