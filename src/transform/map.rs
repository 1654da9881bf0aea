// src/transform/map.rs

use tracing::debug;

use super::{owned_header, RawRow, RowCtx, Table, TransformError, TransformResult};
use crate::reference;

pub const MAP_HEADER: &[&str] = &["fips_code", "state_abbr", "value"];

pub fn header() -> Vec<String> {
    owned_header(MAP_HEADER)
}

/// State-by-state map file.
///
/// Input columns: `state`, `value`. Each row becomes
/// `fips_code, state_abbr, value` in input order; codes without a state are
/// fatal for the whole file.
pub fn transform_map(file: &str, rows: &[RawRow]) -> TransformResult {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let ctx = RowCtx::new(file, row);
        ctx.at_least(2)?;
        let (code, value) = (&row[0], &row[1]);

        let abbr = code
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(reference::state_abbr)
            .ok_or_else(|| TransformError::UnmappedGeographicCode {
                file: file.to_string(),
                code: code.clone(),
                row: ctx.text(),
            })?;

        records.push(vec![
            Some(code.clone()),
            Some(abbr.to_string()),
            Some(value.clone()),
        ]);
    }

    debug!(file, records = records.len(), "map rows resolved");
    Ok(Table::new(header(), records))
}
