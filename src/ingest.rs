//! Convert loosely-typed EXIF metadata into [`Photo`] records.
//!
//! EXIF extraction itself (binary parsing, multipart uploads) belongs to an
//! external collaborator; what arrives here is a flat summary of the fields
//! that collaborator reports: GPS magnitudes with hemisphere references and
//! raw date strings. This module is the only place such untyped values are
//! interpreted. Everything downstream works on the strongly typed record.
//!
//! GPS sign is resolved by hemisphere: a south latitude reference or a west
//! longitude reference negates the reported magnitude. Coordinates are kept
//! only when magnitude and reference are present for both axes, so a
//! `Photo` can never carry half a position.

use std::path::Path;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{GeoPoint, Photo};

/// Loosely-typed metadata summary produced by an EXIF extractor.
///
/// Field names follow the EXIF tags they come from. All fields are optional
/// because any of them may be missing from a given image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifSummary {
    /// GPS latitude magnitude in decimal degrees, always non-negative.
    pub gps_latitude: Option<f64>,
    /// Latitude hemisphere, `N` or `S`.
    pub gps_latitude_ref: Option<String>,
    /// GPS longitude magnitude in decimal degrees, always non-negative.
    pub gps_longitude: Option<f64>,
    /// Longitude hemisphere, `E` or `W`.
    pub gps_longitude_ref: Option<String>,
    /// Raw capture time string, preferred over `create_date`.
    pub date_time_original: Option<String>,
    /// Raw fallback time string.
    pub create_date: Option<String>,
}

impl ExifSummary {
    /// Resolve the GPS position, if both axes are fully specified.
    ///
    /// Returns `None` when any of the four GPS fields is missing.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let lat = self.gps_latitude?;
        let lat_ref = self.gps_latitude_ref.as_deref()?;
        let lon = self.gps_longitude?;
        let lon_ref = self.gps_longitude_ref.as_deref()?;

        let lat = if lat_ref.eq_ignore_ascii_case("S") { -lat } else { lat };
        let lon = if lon_ref.eq_ignore_ascii_case("W") { -lon } else { lon };
        Some(GeoPoint::new(lat, lon))
    }

    /// Resolve the capture timestamp.
    ///
    /// `DateTimeOriginal` is preferred; `CreateDate` is the fallback. A
    /// string that parses as neither RFC 3339 nor the EXIF date form
    /// normalizes to `None` rather than an error.
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        self.date_time_original
            .as_deref()
            .and_then(parse_photo_timestamp)
            .or_else(|| self.create_date.as_deref().and_then(parse_photo_timestamp))
    }
}

/// Parse a photo timestamp string.
///
/// Accepts RFC 3339 (`2024-06-01T10:15:00Z`) and the EXIF date form
/// (`2024:06:01 10:15:00`, assumed UTC). Returns `None` for anything else.
pub fn parse_photo_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }

    let exif_format = format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(raw, exif_format)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Assemble a [`Photo`] from an EXIF summary and storage details.
///
/// The title is the original filename without its extension and the access
/// URL points at the stored file, matching how uploads are published.
pub fn photo_from_exif(
    id: i64,
    original_name: &str,
    stored_filename: &str,
    exif: &ExifSummary,
    created_at: OffsetDateTime,
) -> Photo {
    let title = Path::new(original_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| original_name.to_string());

    Photo {
        id,
        coords: exif.coordinates(),
        timestamp: exif.timestamp(),
        title,
        filename: stored_filename.to_string(),
        url: format!("/uploads/{stored_filename}"),
        created_at,
    }
}
