pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::ParserError;
pub use model::{RawFix, RawTrack, RAW_TIMESTAMP_FORMAT};
pub use registry::{parse_track_file, parse_with_parsers, TrackParser};

#[cfg(test)]
mod tests;
