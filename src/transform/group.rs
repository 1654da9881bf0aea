// src/transform/group.rs

use std::collections::BTreeMap;
use tracing::debug;

use super::pair::{classify_adjustment, Pair};
use super::{
    month_entry, ByMonth, RawRow, Record, RowCtx, Table, TransformError, TransformOptions,
    TransformResult,
};
use crate::reference::{self, GroupType};

const SIDES: [&str; 2] = ["vol", "vol_unadj"];

/// `month, date, vol, vol_unadj, <stem>_group`
pub fn header(group: GroupType) -> Vec<String> {
    vec![
        "month".to_string(),
        "date".to_string(),
        SIDES[0].to_string(),
        SIDES[1].to_string(),
        format!("{}_group", group.column_stem()),
    ]
}

/// Output line before it is turned into cells.
///
/// Field order is the sort order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct GroupRecord {
    month: u32,
    date: String,
    adjusted: Option<String>,
    unadjusted: Option<String>,
    label: String,
}

impl From<GroupRecord> for Record {
    fn from(r: GroupRecord) -> Self {
        vec![
            Some(r.month.to_string()),
            Some(r.date),
            r.adjusted,
            r.unadjusted,
            Some(r.label),
        ]
    }
}

/// Volume broken down by borrower group.
///
/// Input columns: `month`, `value`, `group`, `adjustment`. Adjusted and
/// unadjusted values merge per (month, group); any group label is accepted
/// and rewritten to its display text on output.
pub fn transform_group_volume(
    file: &str,
    rows: &[RawRow],
    group: GroupType,
    opts: &TransformOptions,
) -> TransformResult {
    let mut by_month: ByMonth<BTreeMap<String, Pair>> = ByMonth::new();

    for row in rows {
        let ctx = RowCtx::new(file, row);
        ctx.exact(4)?;
        let month = ctx.month(&row[0])?;
        let marker = &row[3];
        let side = classify_adjustment(marker).ok_or_else(|| {
            TransformError::UnrecognizedAdjustmentMarker {
                file: file.to_string(),
                marker: marker.clone(),
                row: ctx.text(),
            }
        })?;

        month_entry(&mut by_month, month, &ctx, opts, BTreeMap::new)?
            .entry(row[2].clone())
            .or_default()
            .fill(side, &row[1], SIDES, &ctx, opts)?;
    }

    let mut records: Vec<GroupRecord> = by_month
        .into_iter()
        .flat_map(|(month, dated)| {
            let date = dated.date;
            dated.value.into_iter().map(move |(label, pair)| GroupRecord {
                month: month.get(),
                date: date.clone(),
                adjusted: pair.first,
                unadjusted: pair.second,
                label: reference::display_label(&label).to_string(),
            })
        })
        .collect();
    records.sort();

    debug!(file, %group, records = records.len(), "group volume flattened");
    Ok(Table::new(
        header(group),
        records.into_iter().map(Record::from).collect(),
    ))
}
