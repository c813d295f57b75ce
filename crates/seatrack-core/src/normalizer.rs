use std::path::Path;

use chrono::Datelike;
use tracing::warn;

use seatrack_parser::RawTrack;

use crate::config::{IdSlice, PipelineConfig};
use crate::types::{Fix, Trajectory};

/// Turn a parsed raw track into a canonical trajectory: UTC timestamp,
/// day-of-year, both longitude conventions, and the band id tag from
/// the filename. Derived kinematic fields start out missing.
pub fn normalize(raw: RawTrack, filename: &str, config: &PipelineConfig) -> Trajectory {
    let band_id = band_id_from_filename(filename, &config.band_id);

    let fixes = raw
        .fixes
        .into_iter()
        .map(|raw_fix| Fix {
            timestamp_utc: raw_fix.timestamp.map(|ts| ts.and_utc()),
            day_of_year: raw_fix.timestamp.map(|ts| ts.ordinal()),
            latitude: raw_fix.latitude,
            longitude: raw_fix.longitude,
            longitude_east: raw_fix.longitude.map(normalize_longitude_east),
            band_id: Some(band_id.clone()),
            colony_distance_km: None,
            speed_km_h: None,
            trip_duration_h: None,
        })
        .collect();

    Trajectory { band_id, fixes }
}

/// 0..360 eastward convention: shift negative (western) longitudes by
/// a full turn.
pub fn normalize_longitude_east(longitude: f64) -> f64 {
    if longitude < 0.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

/// Band id from the fixed-width slice of the filename. Directories
/// are stripped first. A filename too short for the slice falls back
/// to the file stem so the rows stay attributable in logs.
pub fn band_id_from_filename(filename: &str, slice: &IdSlice) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    match slice.extract(&name) {
        Some(id) => id,
        None => {
            let stem = Path::new(&name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or(name.clone());
            warn!(
                filename = %name,
                fallback = %stem,
                "filename too short for the band id slice, using the stem"
            );
            stem
        }
    }
}
