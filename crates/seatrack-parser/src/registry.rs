use crate::errors::ParserError;
use crate::formats::{CatlogParser, IgotuParser};
use crate::model::RawTrack;

pub trait TrackParser {
    fn name(&self) -> &'static str;
    fn parse(&self, content: &str, timestamp_format: &str) -> Result<RawTrack, ParserError>;
}

pub fn parse_track_file(content: &str, timestamp_format: &str) -> Result<RawTrack, ParserError> {
    let igotu = IgotuParser;
    let catlog = CatlogParser;
    let parsers: [&dyn TrackParser; 2] = [&igotu, &catlog];
    parse_with_parsers(content, timestamp_format, &parsers)
}

/// Try each parser in order. A `FormatMismatch` means "not my file"
/// and is collected; any other error is a real problem with a file a
/// parser did claim, and propagates as-is.
pub fn parse_with_parsers(
    content: &str,
    timestamp_format: &str,
    parsers: &[&dyn TrackParser],
) -> Result<RawTrack, ParserError> {
    let mut attempts = Vec::with_capacity(parsers.len());

    for parser in parsers {
        match parser.parse(content, timestamp_format) {
            Ok(track) => return Ok(track),
            Err(ParserError::FormatMismatch { parser, reason }) => {
                attempts.push(format!("{parser}: {reason}"));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
