// src/transform/error.rs

use thiserror::Error;

use super::date::DateError;

/// Data-quality failures that abort the transform of one file.
///
/// Every variant carries the source file name and the offending raw row,
/// joined with commas as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unrecognized adjustment marker '{marker}' in {file}: {row}")]
    UnrecognizedAdjustmentMarker {
        file: String,
        marker: String,
        row: String,
    },

    #[error("illegal group name '{label}' in {file}: {row}")]
    IllegalGroupLabel {
        file: String,
        label: String,
        row: String,
    },

    #[error("no state abbreviation for FIPS code '{code}' in {file}: {row}")]
    UnmappedGeographicCode {
        file: String,
        code: String,
        row: String,
    },

    #[error("bad month index in {file}: {row}")]
    InvalidMonthIndex {
        file: String,
        row: String,
        #[source]
        source: DateError,
    },

    #[error("expected {expected} fields, found {found} in {file}: {row}")]
    WrongFieldCount {
        file: String,
        expected: usize,
        found: usize,
        row: String,
    },

    #[error("'{slot}' already set for this month in {file}: {row}")]
    DuplicateContribution {
        file: String,
        slot: String,
        row: String,
    },
}
