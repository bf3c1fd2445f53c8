//! Geo resolution and world-coverage datasets for the choropleth.
//!
//! The reporting API only returns countries that had traffic, and names some
//! of them in ways the ISO table doesn't know ("South Korea",
//! "Myanmar (Burma)"). [`build_coverage`] turns that sparse list into one
//! row per canonical country, zero-filled, so the display's color scale
//! always sees the whole world.
//!
//! Resolution order for each identifier:
//!
//! 1. Direct lookup in [`COUNTRIES`] by alpha-2, alpha-3 or exact name
//! 2. The [`OVERRIDES`] table
//! 3. Otherwise the record is dropped (per-row, never fatal)

pub mod countries;

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

pub use countries::{CENTROIDS, COUNTRIES, Centroid, Country, OVERRIDES};

use crate::error::SourceError;
use crate::model::{CountryViewRecord, WorldCoverageRow};

/// Smallest and largest bubble on the marker map, in pixels.
const MIN_MARKER_PX: f64 = 6.0;
const MAX_MARKER_PX: f64 = 22.0;

/// Look a country up in the standard table by code or exact name.
pub fn lookup(identifier: &str) -> Option<&'static Country> {
    let id = identifier.trim();
    match id.len() {
        2 => COUNTRIES.iter().find(|c| c.alpha2.eq_ignore_ascii_case(id)),
        3 => COUNTRIES.iter().find(|c| c.alpha3.eq_ignore_ascii_case(id)),
        _ => None,
    }
    .or_else(|| {
        let lowered = id.to_lowercase();
        COUNTRIES.iter().find(|c| c.name.to_lowercase() == lowered)
    })
}

/// Resolve any identifier the reporting side emits to ISO alpha-3.
pub fn resolve_iso3(identifier: &str) -> Result<&'static str, SourceError> {
    if let Some(country) = lookup(identifier) {
        return Ok(country.alpha3);
    }

    let key = identifier.trim().to_lowercase();
    OVERRIDES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, iso3)| *iso3)
        .ok_or_else(|| SourceError::Unresolvable(identifier.to_string()))
}

/// Build the full-world coverage dataset from sparse per-country views.
pub fn build_coverage(records: &[CountryViewRecord]) -> Vec<WorldCoverageRow> {
    build_coverage_with(records, COUNTRIES)
}

/// Build a coverage dataset against an explicit canonical country list.
///
/// The output has exactly one row per distinct alpha-3 in `reference`, in
/// reference order. Counts for the same country from several records are
/// summed. Records that don't resolve, or resolve to a country outside
/// `reference`, contribute nothing.
pub fn build_coverage_with(
    records: &[CountryViewRecord],
    reference: &[Country],
) -> Vec<WorldCoverageRow> {
    let mut rows: Vec<WorldCoverageRow> = Vec::with_capacity(reference.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(reference.len());

    for country in reference {
        if index.contains_key(country.alpha3) {
            continue;
        }
        index.insert(country.alpha3, rows.len());
        rows.push(WorldCoverageRow {
            iso3: country.alpha3.to_string(),
            display_name: country.name.to_string(),
            view_count: 0,
        });
    }

    for record in records {
        let iso3 = match resolve_iso3(&record.country_code) {
            Ok(iso3) => iso3,
            Err(e) => {
                debug!(country = %record.country_code, error = %e, "Dropping country record");
                continue;
            }
        };

        match index.get(iso3) {
            Some(&i) => {
                rows[i].view_count = rows[i].view_count.saturating_add(record.view_count);
            }
            None => {
                debug!(country = %record.country_code, iso3, "Country outside reference list");
            }
        }
    }

    rows
}

/// Color-scale bounds over a coverage dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageBounds {
    pub min: u64,
    pub max: u64,
}

impl CoverageBounds {
    pub fn of(rows: &[WorldCoverageRow]) -> Self {
        Self {
            min: rows.iter().map(|r| r.view_count).min().unwrap_or(0),
            max: rows.iter().map(|r| r.view_count).max().unwrap_or(0),
        }
    }
}

/// The canonical subset covered by the centroid table.
pub fn centroid_reference() -> Vec<Country> {
    CENTROIDS
        .iter()
        .filter_map(|centroid| lookup(centroid.alpha2).copied())
        .collect()
}

/// A sized bubble for the marker map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub iso3: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub view_count: u64,
    pub size_px: f64,
}

/// Bubbles for every centroid country with at least one view.
pub fn build_markers(rows: &[WorldCoverageRow]) -> Vec<MapMarker> {
    let placed: Vec<(&Centroid, &WorldCoverageRow)> = CENTROIDS
        .iter()
        .filter_map(|centroid| {
            let iso3 = lookup(centroid.alpha2)?.alpha3;
            let row = rows.iter().find(|r| r.iso3 == iso3)?;
            (row.view_count > 0).then_some((centroid, row))
        })
        .collect();

    let max_views = placed
        .iter()
        .map(|(_, row)| row.view_count)
        .max()
        .unwrap_or(0)
        .max(1);

    placed
        .into_iter()
        .map(|(centroid, row)| MapMarker {
            iso3: row.iso3.clone(),
            display_name: row.display_name.clone(),
            lat: centroid.lat,
            lon: centroid.lon,
            view_count: row.view_count,
            size_px: (row.view_count as f64 / max_views as f64 * MAX_MARKER_PX)
                .clamp(MIN_MARKER_PX, MAX_MARKER_PX),
        })
        .collect()
}
