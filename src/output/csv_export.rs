//! CSV export of enriched places
//!
//! One row per place: name, map deep link, phone, rating, website, and the
//! social set joined with newlines inside a single quoted field. Absent
//! values export as empty strings so the file always round-trips through
//! spreadsheet tools.

use crate::places::EnrichedPlace;
use crate::Result;
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 6] = ["name", "map_url", "phone", "rating", "website", "social"];

/// Writes enriched places as CSV to the given writer
pub fn write_csv<W: Write>(writer: W, places: &[EnrichedPlace]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADERS)?;

    for place in places {
        let details = place.details.as_ref();
        let phone = details.and_then(|d| d.phone.as_deref()).unwrap_or("");
        let rating = details
            .and_then(|d| d.rating)
            .map(|r| r.to_string())
            .unwrap_or_default();
        let website = details.and_then(|d| d.website.as_deref()).unwrap_or("");
        let social = place
            .social
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        csv_writer.write_record([
            place.name.as_str(),
            place.map_url.as_str(),
            phone,
            rating.as_str(),
            website,
            social.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes enriched places as CSV to a file path
pub fn export_csv(path: &Path, places: &[EnrichedPlace]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, places)?;
    tracing::info!("Exported {} places to {}", places.len(), path.display());
    Ok(())
}
