// crates/seatrack-core/src/types.rs

use chrono::{DateTime, Utc};

/// One GPS observation carried through the pipeline. Every field that
/// can fail to parse or to be derived is an `Option`; the aggregate
/// completeness filter removes rows with any `None` at the very end,
/// so no stage needs to abort on bad data.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub timestamp_utc: Option<DateTime<Utc>>,
    /// Signed degrees, -90..90.
    pub latitude: Option<f64>,
    /// Signed degrees, -180..180, as logged.
    pub longitude: Option<f64>,
    /// Eastward-normalized degrees, 0..360 (negative values + 360),
    /// kept alongside the signed form for Pacific-crossing plots.
    pub longitude_east: Option<f64>,
    /// Band id of the tracked bird, derived from the input filename.
    pub band_id: Option<String>,
    /// 1..=366, from the parsed timestamp.
    pub day_of_year: Option<u32>,
    /// Great-circle distance to the trajectory origin (the colony).
    pub colony_distance_km: Option<f64>,
    pub speed_km_h: Option<f64>,
    /// Hours elapsed since the first fix of the trip window.
    pub trip_duration_h: Option<f64>,
}

impl Fix {
    /// The all-missing row substituted for a trajectory that never
    /// crosses the trip threshold. It keeps the schema uniform across
    /// trajectories and is guaranteed to be dropped by the
    /// completeness filter.
    pub fn placeholder() -> Self {
        Self {
            timestamp_utc: None,
            latitude: None,
            longitude: None,
            longitude_east: None,
            band_id: None,
            day_of_year: None,
            colony_distance_km: None,
            speed_km_h: None,
            trip_duration_h: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.timestamp_utc.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.band_id.is_none()
    }
}

/// Ordered fix sequence for one tracked bird, built from one input
/// file. Invariant: fixes are ordered non-decreasing by timestamp
/// (logger files are written in record order).
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub band_id: String,
    pub fixes: Vec<Fix>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// True once the trajectory has been collapsed to the single
    /// all-missing row.
    pub fn is_placeholder(&self) -> bool {
        self.fixes.len() == 1 && self.fixes[0].is_missing()
    }

    pub fn placeholder(band_id: impl Into<String>) -> Self {
        Self {
            band_id: band_id.into(),
            fixes: vec![Fix::placeholder()],
        }
    }
}
