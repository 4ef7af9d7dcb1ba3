//! Built-in and file-based attraction tables.
//!
//! The crate ships the Rome landmark table the original map view was built
//! around; hosting applications can also load their own table from a CSV
//! file with `name,description,latitude,longitude` columns.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::geo::GeoPoint;
use crate::resolver::{Attraction, AttractionTable};

/// The central Rome landmark table.
///
/// Entry order matters: nearest-attraction ties resolve to the earliest
/// entry.
pub fn rome() -> AttractionTable {
    let entries = [
        (
            "Colosseum",
            "The Flavian Amphitheatre, Rome's most imposing monument, visited by six million people a year.",
            41.8902,
            12.4922,
        ),
        (
            "Roman Forum",
            "The plaza between Piazza Venezia and the Colosseum that was the center of Roman public life.",
            41.8925,
            12.4853,
        ),
        (
            "Trevi Fountain",
            "The largest and most spectacular fountain in Rome, where visitors toss a coin to wish for a return.",
            41.9009,
            12.4833,
        ),
        (
            "Pantheon",
            "Completed by Hadrian around 126 AD and the best preserved building of ancient Rome.",
            41.8986,
            12.4768,
        ),
        (
            "Spanish Steps",
            "The stairway of Piazza di Spagna, a stage for events and fashion shows and one of Rome's landmarks.",
            41.9059,
            12.4823,
        ),
        (
            "Vatican City",
            "St. Peter's Square at the foot of the Basilica, one of the most famous squares in the world.",
            41.9022,
            12.4534,
        ),
    ];

    AttractionTable::new(
        entries
            .into_iter()
            .map(|(name, description, lat, lon)| Attraction {
                name: name.to_string(),
                description: description.to_string(),
                coords: GeoPoint::new(lat, lon),
            })
            .collect(),
    )
}

/// Load an attraction table from a CSV file.
///
/// The file must have a header row and `name,description,latitude,longitude`
/// columns. Table order follows file order.
pub fn load_attractions_csv<P: AsRef<Path>>(path: P) -> Result<AttractionTable> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open attraction table {}", path.display()))?;
    read_attractions(reader)
}

/// Read an attraction table from any CSV source.
pub fn read_attractions_csv<R: Read>(source: R) -> Result<AttractionTable> {
    read_attractions(csv::Reader::from_reader(source))
}

fn read_attractions<R: Read>(mut reader: csv::Reader<R>) -> Result<AttractionTable> {
    let mut attractions = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record at row {}", row + 1))?;
        let name = record.get(0).unwrap_or("").to_string();
        let description = record.get(1).unwrap_or("").to_string();
        let lat: f64 = record
            .get(2)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("bad latitude for {name:?} at row {}", row + 1))?;
        let lon: f64 = record
            .get(3)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("bad longitude for {name:?} at row {}", row + 1))?;

        attractions.push(Attraction {
            name,
            description,
            coords: GeoPoint::new(lat, lon),
        });
    }
    Ok(AttractionTable::new(attractions))
}
