// crates/seatrack-core/src/pipeline.rs

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{info, warn};

use seatrack_parser::{parse_track_file, RawTrack};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::geodesy;
use crate::kinematics;
use crate::normalizer;
use crate::trip;
use crate::types::{Fix, Trajectory};

/// Aggregate table columns, in output order.
pub const AGGREGATE_COLUMNS: [&str; 9] = [
    "timestamp_utc",
    "latitude",
    "longitude",
    "longitude_east",
    "band_id",
    "colony_distance_km",
    "day_of_year",
    "speed_km_h",
    "trip_duration_h",
];

/// What happened during one batch run. Nothing in here is fatal:
/// every failure mode degrades to rows the completeness filter
/// removes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files_seen: usize,
    pub files_parsed: usize,
    pub duplicates_skipped: usize,
    pub placeholder_trajectories: usize,
    pub rows_before_filter: usize,
    pub rows_after_filter: usize,
}

pub struct PipelineOutput {
    pub table: DataFrame,
    pub report: RunReport,
}

/// Run the whole pipeline over every `*.csv` in `input_dir`:
/// parse → normalize → colony distances → trip window → kinematics,
/// independently per file, then concatenate in deterministic
/// (sorted-path) order and sweep out rows with any missing field.
/// Every file contributes its rows; byte-identical inputs are skipped
/// only when `skip_duplicate_inputs` is set.
pub fn run_pipeline(input_dir: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    let paths = discover_inputs(input_dir)?;
    info!(files = paths.len(), input_dir = %input_dir.display(), "starting batch run");

    let mut report = RunReport::default();
    let mut seen_hashes: HashSet<String> = HashSet::new();
    let mut trajectories: Vec<Trajectory> = Vec::with_capacity(paths.len());

    for path in &paths {
        report.files_seen += 1;

        let bytes = fs::read(path)?;
        if config.skip_duplicate_inputs {
            let hash = blake3::hash(&bytes).to_hex().to_string();
            if !seen_hashes.insert(hash) {
                warn!(path = %path.display(), "skipping file with duplicate contents");
                report.duplicates_skipped += 1;
                continue;
            }
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let trajectory = match parse_input(&bytes, &filename, config) {
            Ok(raw) => {
                report.files_parsed += 1;
                process_track(raw, &filename, config)
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "could not parse file, keeping a placeholder row");
                let band_id = normalizer::band_id_from_filename(&filename, &config.band_id);
                Trajectory::placeholder(band_id)
            }
        };

        if trajectory.is_placeholder() {
            report.placeholder_trajectories += 1;
        }
        trajectories.push(trajectory);
    }

    let rows: Vec<Fix> = trajectories
        .into_iter()
        .flat_map(|trajectory| trajectory.fixes)
        .collect();
    report.rows_before_filter = rows.len();

    let table = build_aggregate_frame(&rows)?;
    let table = table.lazy().drop_nulls(None).collect()?;
    report.rows_after_filter = table.height();

    info!(
        rows_before = report.rows_before_filter,
        rows_after = report.rows_after_filter,
        placeholders = report.placeholder_trajectories,
        "batch run complete"
    );

    Ok(PipelineOutput { table, report })
}

/// The per-trajectory pipeline, pure in its inputs: each stage
/// consumes the trajectory and returns a new one.
pub fn process_track(raw: RawTrack, filename: &str, config: &PipelineConfig) -> Trajectory {
    let mut trajectory = normalizer::normalize(raw, filename, config);

    let latitudes: Vec<Option<f64>> = trajectory.fixes.iter().map(|fix| fix.latitude).collect();
    let longitudes: Vec<Option<f64>> = trajectory.fixes.iter().map(|fix| fix.longitude).collect();
    let distances = geodesy::distances_from_origin(&latitudes, &longitudes);
    for (fix, distance) in trajectory.fixes.iter_mut().zip(distances) {
        fix.colony_distance_km = distance;
    }

    let trajectory = trip::extract_trip(trajectory, config.trip_threshold_km);
    kinematics::apply_kinematics(trajectory)
}

fn parse_input(bytes: &[u8], filename: &str, config: &PipelineConfig) -> std::result::Result<RawTrack, String> {
    let content = std::str::from_utf8(bytes)
        .map_err(|_| format!("{filename}: contents were not valid UTF-8"))?;
    parse_track_file(content, &config.timestamp_format).map_err(|err| err.to_string())
}

fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = input_dir.join("*.csv");
    let pattern = pattern.to_string_lossy();

    let mut paths = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    // Enumeration order fixes the output row order; sort so reruns
    // are byte-identical regardless of filesystem order.
    paths.sort();
    Ok(paths)
}

fn build_aggregate_frame(rows: &[Fix]) -> Result<DataFrame> {
    let timestamps: Vec<Option<i64>> = rows
        .iter()
        .map(|fix| fix.timestamp_utc.map(|ts| ts.timestamp_micros()))
        .collect();
    let ts_series = Series::new("timestamp_utc".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let latitudes: Vec<Option<f64>> = rows.iter().map(|fix| fix.latitude).collect();
    let longitudes: Vec<Option<f64>> = rows.iter().map(|fix| fix.longitude).collect();
    let longitudes_east: Vec<Option<f64>> = rows.iter().map(|fix| fix.longitude_east).collect();
    let band_ids: Vec<Option<&str>> = rows.iter().map(|fix| fix.band_id.as_deref()).collect();
    let colony_distances: Vec<Option<f64>> =
        rows.iter().map(|fix| fix.colony_distance_km).collect();
    let days_of_year: Vec<Option<u32>> = rows.iter().map(|fix| fix.day_of_year).collect();
    let speeds: Vec<Option<f64>> = rows.iter().map(|fix| fix.speed_km_h).collect();
    let durations: Vec<Option<f64>> = rows.iter().map(|fix| fix.trip_duration_h).collect();

    let df = DataFrame::new(vec![
        ts_series.into(),
        Series::new("latitude".into(), latitudes).into(),
        Series::new("longitude".into(), longitudes).into(),
        Series::new("longitude_east".into(), longitudes_east).into(),
        Series::new("band_id".into(), band_ids).into(),
        Series::new("colony_distance_km".into(), colony_distances).into(),
        Series::new("day_of_year".into(), days_of_year).into(),
        Series::new("speed_km_h".into(), speeds).into(),
        Series::new("trip_duration_h".into(), durations).into(),
    ])?;

    Ok(df)
}
