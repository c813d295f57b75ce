use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{parser} format mismatch: {reason}")]
    FormatMismatch {
        parser: &'static str,
        reason: String,
    },

    #[error("{parser} CSV error: {source}")]
    Csv {
        parser: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{parser} file did not contain any data rows")]
    EmptyData { parser: &'static str },

    /// Every registered parser declined the file. Each entry is one
    /// parser's name and the reason it bowed out.
    #[error("no parser recognized this file: {}", attempts.join("; "))]
    NoMatchingParser { attempts: Vec<String> },
}
