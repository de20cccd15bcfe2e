use crate::util::to_si_size;
use std::path::PathBuf;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, SvgValidationError>;

/// Reasons an SVG upload is rejected.
///
/// Every variant is fatal to the operation that asked for the validation. The
/// display text is user facing and is part of the contract, so it must not
/// carry parser internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvgValidationError {
    /// Byte length exceeds the buffered limit
    #[error("SVG is larger than {}: {}", si_size(.limit, 0), si_size(.actual, 1))]
    TooLarge { limit: u64, actual: u64 },

    /// The document could not be tokenized
    #[error("Unable to parse SVG XML")]
    Unparseable,

    /// No root element, or a root element other than `svg`
    #[error("Expected XML content with an SVG root item")]
    MissingSvgRoot,

    /// A script child or an `on*` attribute was found at `path`
    #[error("Script or event handler detected in SVG at: {path}")]
    ScriptDetected { path: String },
}

impl SvgValidationError {
    /// Lets a larger pipeline tell these apart from recoverable errors.
    pub fn is_fatal(&self) -> bool {
        true
    }
}

fn si_size(bytes: &u64, precision: usize) -> String {
    to_si_size(*bytes, precision)
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    ParseToml(toml::de::Error),

    #[error("failed to parse file: {0}")]
    ParseJson(serde_json::Error),

    #[error("unsupported config format (expected .toml or .json)")]
    UnsupportedFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration in {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}
