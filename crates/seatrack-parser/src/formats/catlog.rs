use crate::errors::ParserError;
use crate::model::RawTrack;
use crate::registry::TrackParser;

use super::{locate_columns, parse_fix_rows};

/// CatLog export: same record semantics as the i-gotU files but with
/// `GMT Date,GMT Time,Lat,Long` header spellings.
#[derive(Debug, Default)]
pub struct CatlogParser;

impl CatlogParser {
    const NAME: &'static str = "CATLOG";
}

impl TrackParser for CatlogParser {
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

        let layout = locate_columns(Self::NAME, &header, "GMT Date", "GMT Time", "Lat", "Long")?;

        parse_fix_rows(Self::NAME, records, layout, timestamp_format)
    }
}
