use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::ParserError;
use crate::model::RAW_TIMESTAMP_FORMAT;
use crate::parse_track_file;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_igotu_export() {
    let content = fixture("igotu_90186.csv");
    let track = parse_track_file(&content, RAW_TIMESTAMP_FORMAT).expect("i-gotU parse failed");

    assert_eq!(track.parser, "IGOTU_GT");
    assert_eq!(track.len(), 5);

    let first = &track.fixes[0];
    let expected = NaiveDate::from_ymd_opt(2020, 11, 13)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(first.timestamp, Some(expected));
    assert_eq!(first.latitude, Some(47.038));
    assert_eq!(first.longitude, Some(-2.0165));
}

#[test]
fn bad_timestamp_degrades_to_missing() {
    let content = fixture("igotu_90186.csv");
    let track = parse_track_file(&content, RAW_TIMESTAMP_FORMAT).unwrap();

    // Row 4 carries a dd-mm-yyyy date the fixed format rejects.
    let bad = &track.fixes[3];
    assert_eq!(bad.timestamp, None);
    assert!(bad.latitude.is_some());

    // Row 5 has an empty latitude field.
    let sparse = &track.fixes[4];
    assert!(sparse.timestamp.is_some());
    assert_eq!(sparse.latitude, None);
    assert_eq!(sparse.longitude, Some(-2.1993));
}

#[test]
fn parses_catlog_export() {
    let content = fixture("catlog_71220.csv");
    let track = parse_track_file(&content, RAW_TIMESTAMP_FORMAT).expect("CatLog parse failed");

    assert_eq!(track.parser, "CATLOG");
    assert_eq!(track.len(), 3);
    assert!(track.fixes.iter().all(|fix| {
        fix.timestamp.is_some() && fix.latitude.is_some() && fix.longitude.is_some()
    }));
}

#[test]
fn header_only_file_is_empty_data() {
    let content = fixture("catlog_header_only.csv");
    let err = parse_track_file(&content, RAW_TIMESTAMP_FORMAT).unwrap_err();

    match err {
        ParserError::EmptyData { parser } => assert_eq!(parser, "CATLOG"),
        other => panic!("expected EmptyData, got {other}"),
    }
}

#[test]
fn unrecognized_header_reports_all_attempts() {
    let content = fixture("depth_logger.csv");
    let err = parse_track_file(&content, RAW_TIMESTAMP_FORMAT).unwrap_err();

    match err {
        ParserError::NoMatchingParser { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert!(attempts.iter().any(|a| a.starts_with("IGOTU_GT:")));
            assert!(attempts.iter().any(|a| a.starts_with("CATLOG:")));
        }
        other => panic!("expected NoMatchingParser, got {other}"),
    }
}

#[test]
fn custom_timestamp_format_is_honored() {
    let content = "Date,Time,Latitude,Longitude\n13/11/2020,10:00:00,47.0,-2.0\n";
    let track = parse_track_file(content, "%d/%m/%Y %H:%M:%S").unwrap();

    let expected = NaiveDate::from_ymd_opt(2020, 11, 13)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(track.fixes[0].timestamp, Some(expected));
}
