use crate::errors::ParserError;
use crate::model::RawTrack;
use crate::registry::TrackParser;

use super::{locate_columns, parse_fix_rows};

/// i-gotU GT-series export: `Date,Time,Latitude,Longitude` plus
/// whatever extra columns the vendor tool appended (altitude, speed,
/// satellite count). Only the four canonical columns are read.
#[derive(Debug, Default)]
pub struct IgotuParser;

impl IgotuParser {
    const NAME: &'static str = "IGOTU_GT";
}

impl TrackParser for IgotuParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str, timestamp_format: &str) -> Result<RawTrack, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or(ParserError::FormatMismatch {
                parser: Self::NAME,
                reason: "file missing header row".to_string(),
            })?
            .map_err(|err| ParserError::Csv {
                parser: Self::NAME,
                source: err,
            })?;

        let layout = locate_columns(Self::NAME, &header, "Date", "Time", "Latitude", "Longitude")?;

        parse_fix_rows(Self::NAME, records, layout, timestamp_format)
    }
}
