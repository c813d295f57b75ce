use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::Result;

/// Write the cleaned aggregate table as delimited text. No row-index
/// column is persisted; the header carries the canonical column names.
pub fn write_aggregate_csv(table: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut out = table.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)?;
    Ok(())
}

/// Per-bird descriptive statistics over the cleaned aggregate table,
/// sorted by band id for stable display.
pub fn trip_summary(table: &DataFrame) -> Result<DataFrame> {
    let summary = table
        .clone()
        .lazy()
        .group_by([col("band_id")])
        .agg([
            col("timestamp_utc").count().alias("fixes"),
            col("colony_distance_km")
                .max()
                .alias("max_colony_distance_km"),
            col("trip_duration_h").max().alias("trip_duration_h"),
            col("speed_km_h").mean().alias("mean_speed_km_h"),
            col("speed_km_h").max().alias("max_speed_km_h"),
        ])
        .sort(["band_id"], Default::default())
        .collect()?;

    Ok(summary)
}
