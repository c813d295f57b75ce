use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{RawFix, RawTrack};

/// Indices of the four columns every supported logger export carries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnLayout {
    pub date: usize,
    pub time: usize,
    pub latitude: usize,
    pub longitude: usize,
}

/// Match a header row against a format's column spellings
/// (case-insensitive). Extra columns are ignored; a missing required
/// column is a format mismatch, which lets the registry move on to
/// the next parser.
pub(crate) fn locate_columns(
    parser: &'static str,
    header: &StringRecord,
    date: &str,
    time: &str,
    latitude: &str,
    longitude: &str,
) -> Result<ColumnLayout, ParserError> {
    let find = |wanted: &str| {
        header
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(wanted))
    };

    let missing = |wanted: &str| ParserError::FormatMismatch {
        parser,
        reason: format!("missing required column '{wanted}'"),
    };

    Ok(ColumnLayout {
        date: find(date).ok_or_else(|| missing(date))?,
        time: find(time).ok_or_else(|| missing(time))?,
        latitude: find(latitude).ok_or_else(|| missing(latitude))?,
        longitude: find(longitude).ok_or_else(|| missing(longitude))?,
    })
}

/// Concatenate the date and time text fields and parse them with the
/// fixed format. An unparseable timestamp degrades to `None`.
pub(crate) fn parse_raw_timestamp(
    date: &str,
    time: &str,
    timestamp_format: &str,
) -> Option<NaiveDateTime> {
    let joined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&joined, timestamp_format).ok()
}

pub(crate) fn parse_optional_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed.eq_ignore_ascii_case("na")
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Shared record loop for the delimited logger exports. Rows too short
/// to hold the located columns yield an all-missing fix.
pub(crate) fn parse_fix_rows<I>(
    parser: &'static str,
    records: I,
    layout: ColumnLayout,
    timestamp_format: &str,
) -> Result<RawTrack, ParserError>
where
    I: Iterator<Item = Result<StringRecord, csv::Error>>,
{
    let mut fixes = Vec::new();

    for record in records {
        let record = record.map_err(|err| ParserError::Csv {
            parser,
            source: err,
        })?;

        let field = |idx: usize| record.get(idx).unwrap_or("");

        let timestamp = parse_raw_timestamp(field(layout.date), field(layout.time), timestamp_format);
        let latitude = parse_optional_f64(field(layout.latitude));
        let longitude = parse_optional_f64(field(layout.longitude));

        fixes.push(RawFix {
            timestamp,
            latitude,
            longitude,
        });
    }

    if fixes.is_empty() {
        return Err(ParserError::EmptyData { parser });
    }

    Ok(RawTrack { parser, fixes })
}
