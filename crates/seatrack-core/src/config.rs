use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Runtime knobs for the pipeline, loadable from a TOML file. Every
/// field has a default matching the colony-trip conventions, so a
/// missing file or missing key falls back to the standard run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// A fix counts as "on trip" once it is at least this far from the
    /// colony.
    pub trip_threshold_km: f64,
    /// chrono format string applied to the concatenated date and time
    /// text fields.
    pub timestamp_format: String,
    /// Skip input files whose contents are byte-identical to one
    /// already processed in the same run. Off by default: every file
    /// in the directory contributes its rows unless asked otherwise.
    pub skip_duplicate_inputs: bool,
    /// Where the band id sits inside the input filename.
    pub band_id: IdSlice,
}

/// Fixed-width slice locating the band id in a filename, anchored to
/// the end of the name so directory layout and prefixes don't matter.
///
/// The deployment files are named like `27_405_90186_201113.csv`: the
/// five-character band id is followed by an underscore, a six-digit
/// date and the `.csv` extension, which puts eleven characters between
/// the id and the end of the name.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdSlice {
    /// Number of characters in the id.
    pub width: usize,
    /// Characters between the end of the id and the end of the
    /// filename (extension included).
    pub end_offset: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            trip_threshold_km: 5.0,
            timestamp_format: seatrack_parser::RAW_TIMESTAMP_FORMAT.to_string(),
            skip_duplicate_inputs: false,
            band_id: IdSlice::default(),
        }
    }
}

impl Default for IdSlice {
    fn default() -> Self {
        Self {
            width: 5,
            end_offset: 11,
        }
    }
}

impl IdSlice {
    /// Extract the id from a bare filename. `None` when the name is
    /// too short to contain the slice.
    pub fn extract(&self, filename: &str) -> Option<String> {
        let chars: Vec<char> = filename.chars().collect();
        let end = chars.len().checked_sub(self.end_offset)?;
        let start = end.checked_sub(self.width)?;
        Some(chars[start..end].iter().collect())
    }
}

impl PipelineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                Ok(toml::from_str(&contents)?)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_colony_conventions() {
        let config = PipelineConfig::default();
        assert_eq!(config.trip_threshold_km, 5.0);
        assert_eq!(config.timestamp_format, "%Y/%m/%d %H:%M:%S");
        assert!(!config.skip_duplicate_inputs);
        assert_eq!(config.band_id.width, 5);
        assert_eq!(config.band_id.end_offset, 11);
    }

    #[test]
    fn extracts_band_id_from_deployment_filename() {
        let slice = IdSlice::default();
        assert_eq!(
            slice.extract("27_405_90186_201113.csv").as_deref(),
            Some("90186")
        );
    }

    #[test]
    fn short_filename_yields_none() {
        let slice = IdSlice::default();
        assert_eq!(slice.extract("short.csv"), None);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            trip_threshold_km = 2.5

            [band_id]
            width = 4
            end_offset = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.trip_threshold_km, 2.5);
        assert_eq!(config.band_id.width, 4);
        // Untouched keys keep their defaults.
        assert_eq!(config.timestamp_format, "%Y/%m/%d %H:%M:%S");
        assert_eq!(config.band_id.extract("bird_9018.csv").as_deref(), Some("9018"));
    }
}
