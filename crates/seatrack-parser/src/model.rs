use chrono::NaiveDateTime;

/// Default timestamp layout shared by the supported logger exports.
/// The date and time columns are concatenated with a single space
/// before parsing.
pub const RAW_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One GPS observation as it appears in a raw logger file.
///
/// A field that fails to parse becomes `None` rather than an error;
/// rows with missing fields are swept out at the end of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFix {
    pub timestamp: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// An ordered fix sequence parsed from a single logger file.
#[derive(Debug, Clone)]
pub struct RawTrack {
    /// Name of the format parser that recognized the file.
    pub parser: &'static str,
    pub fixes: Vec<RawFix>,
}

impl RawTrack {
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}
