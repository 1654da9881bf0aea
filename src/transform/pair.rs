// src/transform/pair.rs

use tracing::warn;

use super::{RowCtx, TransformError, TransformOptions};

/// Which half of a two-valued record a row contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Two values assembled from separate rows; either may still be missing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pair {
    pub first: Option<String>,
    pub second: Option<String>,
}

impl Pair {
    fn side_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }

    /// Store `value` on `side`; `names` labels the two sides for diagnostics.
    pub(crate) fn fill(
        &mut self,
        side: Side,
        value: &str,
        names: [&str; 2],
        ctx: &RowCtx<'_>,
        opts: &TransformOptions,
    ) -> Result<(), TransformError> {
        let name = match side {
            Side::First => names[0],
            Side::Second => names[1],
        };
        fill_slot(self.side_mut(side), value, name, ctx, opts)
    }
}

/// Seasonally adjusted rows fill the first side, unadjusted rows the second.
///
/// Matching is case-insensitive on substrings: "unadjust" or "not seasonal"
/// mark unadjusted data, any other mention of "seasonal" marks adjusted data.
pub fn classify_adjustment(marker: &str) -> Option<Side> {
    let marker = marker.to_lowercase();
    if marker.contains("unadjust") || marker.contains("not seasonal") {
        Some(Side::Second)
    } else if marker.contains("seasonal") {
        Some(Side::First)
    } else {
        None
    }
}

/// Loan-count rows fill the first side, dollar-volume rows the second.
pub fn classify_measure(label: &str) -> Option<Side> {
    let label = label.to_lowercase();
    if label.contains("number") {
        Some(Side::First)
    } else if label.contains("volume") {
        Some(Side::Second)
    } else {
        None
    }
}

/// Write one value into a slot that may already hold one.
///
/// A second write keeps the newer value and logs it, unless `opts.strict`.
pub(crate) fn fill_slot(
    slot: &mut Option<String>,
    value: &str,
    name: &str,
    ctx: &RowCtx<'_>,
    opts: &TransformOptions,
) -> Result<(), TransformError> {
    if let Some(previous) = slot.as_deref() {
        if opts.strict {
            return Err(TransformError::DuplicateContribution {
                file: ctx.file.to_string(),
                slot: name.to_string(),
                row: ctx.text(),
            });
        }
        warn!(
            file = ctx.file,
            slot = name,
            previous,
            row = %ctx.text(),
            "slot written twice, keeping the later value"
        );
    }
    *slot = Some(value.to_string());
    Ok(())
}
