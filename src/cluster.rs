//! Group photos by GPS proximity.
//!
//! The grouping pass is a single greedy fold over the photo set:
//!
//! 1. Photos without coordinates are dropped up front. They never appear in
//!    any group, not even a singleton bucket.
//! 2. The remaining photos are sorted by capture time, most recent first.
//!    Undated photos sort after all dated ones and keep their relative
//!    order (the sort is stable).
//! 3. Each photo is tested against the existing groups in creation order.
//!    A group matches when the photo lies within the per-axis tolerance box
//!    around the group centroid. The first matching group absorbs the
//!    photo; if none matches, the photo founds a new group.
//!
//! Matching uses an independent per-axis bound, not a circular radius, and
//! the first match wins rather than the nearest. Both are intentional: a
//! photo near two group boundaries joins whichever group was created first,
//! so re-ordering the input can change membership there. For a fixed input
//! the output is fully deterministic.
//!
//! Complexity is O(n·g) for n photos and g groups, O(n²) in the worst case
//! where every photo founds its own group. There is no spatial index; the
//! engine is designed for modest in-memory sets and recomputes groups from
//! the full snapshot whenever the photo set changes.

use std::cmp::Reverse;

use nalgebra::Vector2;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, info};

use crate::{GeoPoint, Photo};

/// Default per-axis grouping tolerance in degrees, about 11 m at the
/// equator.
pub const DEFAULT_TOLERANCE_DEG: f64 = 0.0001;

/// Parameters controlling a grouping run.
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Maximum per-axis coordinate difference (degrees) for a photo to join
    /// an existing group. Default [`DEFAULT_TOLERANCE_DEG`].
    pub tolerance_deg: f64,
    /// Run-scoped token mixed into group identifiers so that ids from
    /// different runs do not collide. Callers typically pass a clock
    /// reading; the engine itself never consults a clock.
    pub run_token: u64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            run_token: 0,
        }
    }
}

impl GroupingConfig {
    /// Create a configuration with the given tolerance and a zero run token.
    pub fn new(tolerance_deg: f64) -> Self {
        Self {
            tolerance_deg,
            ..Default::default()
        }
    }
}

/// A cluster of photos taken at the same location.
///
/// The group owns its member list for the duration of one grouping run.
/// Members are stored in insertion order; the centroid is the arithmetic
/// mean of all members' coordinates and is recomputed on every insertion.
#[derive(Debug, Clone)]
pub struct PhotoGroup {
    /// Identifier unique within the run, `group-<seq>-<token>`.
    pub id: String,
    photos: Vec<Photo>,
    centroid: GeoPoint,
    representative: usize,
}

impl PhotoGroup {
    fn found(id: String, photo: Photo) -> Self {
        // Callers guarantee the founding photo is geotagged
        let centroid = photo.coords.unwrap_or(GeoPoint::new(0.0, 0.0));
        Self {
            id,
            photos: vec![photo],
            centroid,
            representative: 0,
        }
    }

    /// True when `point` lies within the per-axis tolerance box around the
    /// group centroid. This is a Chebyshev-style box test, not a circular
    /// radius.
    fn matches(&self, point: GeoPoint, tolerance_deg: f64) -> bool {
        (self.centroid.lat_deg - point.lat_deg).abs() <= tolerance_deg
            && (self.centroid.lon_deg - point.lon_deg).abs() <= tolerance_deg
    }

    fn absorb(&mut self, photo: Photo) {
        self.photos.push(photo);
        self.recompute_centroid();

        // The newest member becomes the representative when it carries a
        // timestamp and the current representative is undated or older.
        let newcomer = self.photos.len() - 1;
        if let Some(ts) = self.photos[newcomer].timestamp {
            match self.photos[self.representative].timestamp {
                None => self.representative = newcomer,
                Some(rep_ts) if ts > rep_ts => self.representative = newcomer,
                Some(_) => {}
            }
        }
    }

    fn recompute_centroid(&mut self) {
        let mut acc = Vector2::zeros();
        for photo in &self.photos {
            if let Some(c) = photo.coords {
                acc += Vector2::new(c.lat_deg, c.lon_deg);
            }
        }
        let mean = acc / self.photos.len() as f64;
        self.centroid = GeoPoint::new(mean.x, mean.y);
    }

    /// Members in insertion order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Arithmetic mean coordinate of the current members.
    pub fn centroid(&self) -> GeoPoint {
        self.centroid
    }

    /// Number of members. Always equals `photos().len()`.
    pub fn count(&self) -> usize {
        self.photos.len()
    }

    /// The member with the latest defined timestamp, or the first-assigned
    /// member when no member is dated. Used for the group thumbnail.
    pub fn representative(&self) -> &Photo {
        &self.photos[self.representative]
    }

    /// Access URL of the representative photo.
    pub fn thumbnail_url(&self) -> &str {
        &self.representative().url
    }
}

impl Serialize for PhotoGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PhotoGroup", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("photos", &self.photos)?;
        state.serialize_field("centroid", &self.centroid)?;
        state.serialize_field("thumbnail_url", self.thumbnail_url())?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field("representative", self.representative())?;
        state.end()
    }
}

/// Group geotagged photos by proximity.
///
/// Returns the groups in creation order. Photos without coordinates are
/// discarded and do not affect the result. This is a total, pure function:
/// empty or coordinate-free input yields an empty vector, and a fixed input
/// order always produces the same output.
///
/// The first matching group in creation order wins, even when a later group
/// is closer. This is a known simplification kept for parity with observed
/// behavior; replacing it with a nearest-centroid search would change group
/// membership for photos near multiple group boundaries.
pub fn group_photos_by_location(photos: &[Photo], config: &GroupingConfig) -> Vec<PhotoGroup> {
    let mut tagged: Vec<&Photo> = photos.iter().filter(|p| p.coords.is_some()).collect();
    let skipped = photos.len() - tagged.len();

    // Most recent first; undated photos sort last and stay stable.
    tagged.sort_by_key(|p| Reverse(p.timestamp));

    let mut groups: Vec<PhotoGroup> = Vec::new();
    for photo in tagged {
        let Some(coords) = photo.coords else { continue };

        match groups
            .iter_mut()
            .find(|g| g.matches(coords, config.tolerance_deg))
        {
            Some(group) => {
                debug!("photo {} joins group {}", photo.id, group.id);
                group.absorb(photo.clone());
            }
            None => {
                let id = format!("group-{}-{}", groups.len() + 1, config.run_token);
                debug!("photo {} founds group {}", photo.id, id);
                groups.push(PhotoGroup::found(id, photo.clone()));
            }
        }
    }

    info!(
        "Grouped {} photos into {} groups ({} without coordinates skipped)",
        photos.len() - skipped,
        groups.len(),
        skipped
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn photo(id: i64, coords: Option<(f64, f64)>, timestamp: Option<OffsetDateTime>) -> Photo {
        Photo {
            id,
            coords: coords.map(|(lat, lon)| GeoPoint::new(lat, lon)),
            timestamp,
            title: format!("photo-{id}"),
            filename: format!("photo-{id}.jpg"),
            url: format!("/uploads/photo-{id}.jpg"),
            created_at: datetime!(2024-06-01 12:00:00 UTC),
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = group_photos_by_location(&[], &GroupingConfig::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn photos_without_coordinates_are_dropped() {
        let photos = vec![
            photo(1, None, Some(datetime!(2024-06-01 10:00:00 UTC))),
            photo(2, None, None),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn nearby_photos_merge_and_newest_represents() {
        let photos = vec![
            photo(
                1,
                Some((41.8902, 12.4922)),
                Some(datetime!(2024-06-01 10:00:00 UTC)),
            ),
            photo(
                2,
                Some((41.8903, 12.4923)),
                Some(datetime!(2024-06-01 11:00:00 UTC)),
            ),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.count(), 2);
        // Centroid is the midpoint of the two photos
        assert!((group.centroid().lat_deg - 41.89025).abs() < 1e-9);
        assert!((group.centroid().lon_deg - 12.49225).abs() < 1e-9);
        // Photo 2 is newer, so it was processed first and represents the group
        assert_eq!(group.representative().id, 2);
        assert_eq!(group.thumbnail_url(), "/uploads/photo-2.jpg");
    }

    #[test]
    fn faraway_photo_forms_its_own_group() {
        let photos = vec![
            photo(
                1,
                Some((41.8902, 12.4922)),
                Some(datetime!(2024-06-01 10:00:00 UTC)),
            ),
            photo(
                2,
                Some((41.9500, 12.5000)),
                Some(datetime!(2024-06-01 09:00:00 UTC)),
            ),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count(), 1);
        assert_eq!(groups[1].count(), 1);
    }

    #[test]
    fn centroid_is_mean_of_all_members() {
        let photos = vec![
            photo(1, Some((0.00000, 0.00000)), Some(datetime!(2024-06-01 12:00:00 UTC))),
            photo(2, Some((0.00006, 0.00003)), Some(datetime!(2024-06-01 11:00:00 UTC))),
            photo(3, Some((0.00003, 0.00006)), Some(datetime!(2024-06-01 10:00:00 UTC))),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 1);
        assert!((groups[0].centroid().lat_deg - 0.00003).abs() < 1e-12);
        assert!((groups[0].centroid().lon_deg - 0.00003).abs() < 1e-12);
    }

    #[test]
    fn every_geotagged_photo_lands_in_exactly_one_group() {
        let config = GroupingConfig::default();
        let photos: Vec<Photo> = (0..20)
            .map(|i| {
                photo(
                    i,
                    Some((41.89 + (i as f64) * 0.00002, 12.49)),
                    Some(datetime!(2024-06-01 00:00:00 UTC) + time::Duration::minutes(i)),
                )
            })
            .collect();
        let groups = group_photos_by_location(&photos, &config);

        // Every photo landed in exactly one group
        let total: usize = groups.iter().map(|g| g.count()).sum();
        assert_eq!(total, photos.len());
        let mut seen: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.photos().iter().map(|p| p.id))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<i64> = photos.iter().map(|p| p.id).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn undated_group_represented_by_first_member() {
        let photos = vec![
            photo(1, Some((41.8902, 12.4922)), None),
            photo(2, Some((41.8903, 12.4923)), None),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 1);
        // Undated photos keep input order, so photo 1 founded the group
        assert_eq!(groups[0].representative().id, 1);
    }

    #[test]
    fn dated_photos_process_before_undated_ones() {
        let photos = vec![
            photo(1, Some((41.8902, 12.4922)), None),
            photo(
                2,
                Some((41.8903, 12.4923)),
                Some(datetime!(2024-06-01 10:00:00 UTC)),
            ),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 1);
        // The dated photo founded the group even though it came second
        assert_eq!(groups[0].photos()[0].id, 2);
        assert_eq!(groups[0].representative().id, 2);
    }

    #[test]
    fn first_matching_group_wins_over_nearer_group() {
        // Group 1 forms at lat 0.0, group 2 at lat 0.00015 (outside group 1's
        // box). The boundary photo at lat 0.0001 is within tolerance of both
        // centroids but strictly closer to group 2; it still joins group 1.
        let photos = vec![
            photo(1, Some((0.0, 0.0)), Some(datetime!(2024-06-01 12:00:00 UTC))),
            photo(
                2,
                Some((0.00015, 0.0)),
                Some(datetime!(2024-06-01 11:00:00 UTC)),
            ),
            photo(
                3,
                Some((0.0001, 0.0)),
                Some(datetime!(2024-06-01 10:00:00 UTC)),
            ),
        ];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count(), 2);
        assert_eq!(groups[1].count(), 1);
        assert!(groups[0].photos().iter().any(|p| p.id == 3));
    }

    #[test]
    fn input_order_changes_boundary_membership() {
        // All photos undated, so processing follows input order. The photo
        // at lat 0.0001 joins whichever neighbor group was founded first.
        let a = photo(1, Some((0.0, 0.0)), None);
        let b = photo(2, Some((0.00015, 0.0)), None);
        let c = photo(3, Some((0.0001, 0.0)), None);

        let config = GroupingConfig::default();
        let forward = group_photos_by_location(&[a.clone(), b.clone(), c.clone()], &config);
        let reversed = group_photos_by_location(&[b, a, c], &config);

        let joined_first = |groups: &[PhotoGroup]| {
            groups
                .iter()
                .find(|g| g.photos().iter().any(|p| p.id == 3))
                .map(|g| g.photos()[0].id)
        };
        assert_eq!(joined_first(&forward), Some(1));
        assert_eq!(joined_first(&reversed), Some(2));
    }

    #[test]
    fn group_ids_carry_sequence_and_run_token() {
        let photos = vec![
            photo(1, Some((0.0, 0.0)), Some(datetime!(2024-06-01 12:00:00 UTC))),
            photo(2, Some((10.0, 10.0)), Some(datetime!(2024-06-01 11:00:00 UTC))),
        ];
        let config = GroupingConfig {
            run_token: 1717243200,
            ..Default::default()
        };
        let groups = group_photos_by_location(&photos, &config);

        assert_eq!(groups[0].id, "group-1-1717243200");
        assert_eq!(groups[1].id, "group-2-1717243200");
    }

    #[test]
    fn same_input_gives_identical_output() {
        let photos = vec![
            photo(1, Some((41.8902, 12.4922)), Some(datetime!(2024-06-01 10:00:00 UTC))),
            photo(2, Some((41.8903, 12.4923)), None),
            photo(3, Some((41.9500, 12.5000)), Some(datetime!(2024-06-01 09:00:00 UTC))),
        ];
        let config = GroupingConfig::default();
        let first = group_photos_by_location(&photos, &config);
        let second = group_photos_by_location(&photos, &config);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.photos(), b.photos());
            assert_eq!(a.representative().id, b.representative().id);
        }
    }

    #[test]
    fn absorb_promotes_strictly_newer_dated_member() {
        // The update rule itself, driven directly: a dated newcomer replaces
        // an undated or older representative, but never ties.
        let mut group = PhotoGroup::found(
            "group-1-0".to_string(),
            photo(1, Some((0.0, 0.0)), None),
        );
        group.absorb(photo(
            2,
            Some((0.0, 0.0)),
            Some(datetime!(2024-06-01 10:00:00 UTC)),
        ));
        assert_eq!(group.representative().id, 2);

        group.absorb(photo(
            3,
            Some((0.0, 0.0)),
            Some(datetime!(2024-06-01 10:00:00 UTC)),
        ));
        // Equal timestamp does not displace the representative
        assert_eq!(group.representative().id, 2);

        group.absorb(photo(
            4,
            Some((0.0, 0.0)),
            Some(datetime!(2024-06-01 11:00:00 UTC)),
        ));
        assert_eq!(group.representative().id, 4);

        group.absorb(photo(5, Some((0.0, 0.0)), None));
        assert_eq!(group.representative().id, 4);
    }

    #[test]
    fn group_serializes_with_rendering_fields() {
        let photos = vec![photo(
            1,
            Some((41.8902, 12.4922)),
            Some(datetime!(2024-06-01 10:00:00 UTC)),
        )];
        let groups = group_photos_by_location(&photos, &GroupingConfig::default());
        let json = serde_json::to_value(&groups[0]).expect("serialization failed");

        assert_eq!(json["id"], "group-1-0");
        assert_eq!(json["count"], 1);
        assert_eq!(json["thumbnail_url"], "/uploads/photo-1.jpg");
        assert_eq!(json["representative"]["id"], 1);
        assert_eq!(json["centroid"]["lat_deg"], 41.8902);
    }
}
