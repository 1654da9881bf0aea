// src/transform/summary.rs

use serde::Serialize;
use tracing::debug;

use super::pair::{classify_adjustment, classify_measure, Pair, Side};
use super::{
    month_entry, ByMonth, RawRow, RowCtx, Table, TransformError, TransformOptions,
    TransformResult,
};

/// Which quantity a summary file reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Number of loans originated.
    Num,
    /// Dollar volume of loans originated.
    Vol,
}

impl Measure {
    pub fn stem(self) -> &'static str {
        match self {
            Measure::Num => "num",
            Measure::Vol => "vol",
        }
    }
}

pub const YOY_SUMMARY_HEADER: &[&str] = &["month", "date", "yoy_num", "yoy_vol"];

/// `month, date, <m>, <m>_unadj`
pub fn header(measure: Measure) -> Vec<String> {
    let stem = measure.stem();
    vec![
        "month".to_string(),
        "date".to_string(),
        stem.to_string(),
        format!("{stem}_unadj"),
    ]
}

pub fn yoy_header() -> Vec<String> {
    super::owned_header(YOY_SUMMARY_HEADER)
}

/// Monthly number or volume summary.
///
/// Input columns: `month`, `value`, `adjustment`. The adjusted and unadjusted
/// rows of a month are merged into one record, months ascending.
pub fn transform_summary(
    file: &str,
    rows: &[RawRow],
    measure: Measure,
    opts: &TransformOptions,
) -> TransformResult {
    let stem = measure.stem();
    let unadj = format!("{stem}_unadj");
    let by_month = collect_pairs(file, rows, opts, [stem, unadj.as_str()], |ctx, marker| {
        classify_adjustment(marker).ok_or_else(|| unrecognized(ctx, marker))
    })?;
    debug!(file, months = by_month.len(), "summary months merged");
    Ok(Table::new(header(measure), flatten(by_month)))
}

/// Year-over-year change of loan number and dollar volume.
///
/// Input columns: `month`, `value`, `group`, where `group` reads like
/// "Number of Loans" or "Dollar Volume".
pub fn transform_yoy_summary(
    file: &str,
    rows: &[RawRow],
    opts: &TransformOptions,
) -> TransformResult {
    let by_month = collect_pairs(file, rows, opts, ["yoy_num", "yoy_vol"], |ctx, label| {
        classify_measure(label).ok_or_else(|| unrecognized(ctx, label))
    })?;
    debug!(file, months = by_month.len(), "yoy summary months merged");
    Ok(Table::new(yoy_header(), flatten(by_month)))
}

fn unrecognized(ctx: &RowCtx<'_>, marker: &str) -> TransformError {
    TransformError::UnrecognizedAdjustmentMarker {
        file: ctx.file.to_string(),
        marker: marker.to_string(),
        row: ctx.text(),
    }
}

/// Group three-field rows by month into pairs, `classify` picking the side.
fn collect_pairs<F>(
    file: &str,
    rows: &[RawRow],
    opts: &TransformOptions,
    names: [&str; 2],
    classify: F,
) -> Result<ByMonth<Pair>, TransformError>
where
    F: Fn(&RowCtx<'_>, &str) -> Result<Side, TransformError>,
{
    let mut by_month = ByMonth::new();
    for row in rows {
        let ctx = RowCtx::new(file, row);
        ctx.exact(3)?;
        let month = ctx.month(&row[0])?;
        let side = classify(&ctx, &row[2])?;
        month_entry(&mut by_month, month, &ctx, opts, Pair::default)?
            .fill(side, &row[1], names, &ctx, opts)?;
    }
    Ok(by_month)
}

fn flatten(by_month: ByMonth<Pair>) -> Vec<super::Record> {
    by_month
        .into_iter()
        .map(|(month, dated)| {
            vec![
                Some(month.get().to_string()),
                Some(dated.date),
                dated.value.first,
                dated.value.second,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::{cells, rows};

    #[test]
    fn adjusted_and_unadjusted_rows_merge_per_month() {
        let input = rows(&[
            &["0", "5", "Seasonally Adjusted"],
            &["0", "3", "Not Seasonally Adjusted"],
            &["1", "7", "Seasonally Adjusted"],
        ]);
        let table = transform_summary("num_data_AUT.csv", &input, Measure::Num, &Default::default())
            .unwrap()
            .unwrap();

        assert_eq!(table.header(), ["month", "date", "num", "num_unadj"]);
        assert_eq!(
            table.records(),
            &[
                cells(&[Some("0"), Some("2000-01"), Some("5"), Some("3")]),
                cells(&[Some("1"), Some("2000-02"), Some("7"), None]),
            ]
        );
    }

    #[test]
    fn months_sort_numerically() {
        let input = rows(&[
            &["12", "1", "Unadjusted"],
            &["2", "2", "Unadjusted"],
            &["100", "3", "seasonally adjusted"],
        ]);
        let table = transform_summary("vol_data_MTG.csv", &input, Measure::Vol, &Default::default())
            .unwrap()
            .unwrap();

        assert_eq!(table.header(), ["month", "date", "vol", "vol_unadj"]);
        let months: Vec<_> = table.records().iter().map(|r| r[0].clone().unwrap()).collect();
        assert_eq!(months, ["2", "12", "100"]);
        assert_eq!(table.records()[2][1].as_deref(), Some("2008-05"));
    }

    #[test]
    fn unknown_marker_names_file_and_row() {
        let input = rows(&[&["0", "5", "Adjusted"]]);
        let err = transform_summary("num_data_AUT.csv", &input, Measure::Num, &Default::default())
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::UnrecognizedAdjustmentMarker {
                file: "num_data_AUT.csv".into(),
                marker: "Adjusted".into(),
                row: "0,5,Adjusted".into(),
            }
        );
        assert!(err.to_string().contains("num_data_AUT.csv"));
    }

    #[test]
    fn bad_month_fields_are_rejected() {
        let opts = TransformOptions::default();
        for bad in ["-1", "x", ""] {
            let input = rows(&[&[bad, "5", "Seasonally Adjusted"]]);
            assert!(matches!(
                transform_summary("num_data_AUT.csv", &input, Measure::Num, &opts),
                Err(TransformError::InvalidMonthIndex { .. })
            ));
        }
    }

    #[test]
    fn strict_mode_rejects_repeated_slots() {
        let input = rows(&[
            &["0", "5", "Seasonally Adjusted"],
            &["0", "6", "Seasonally Adjusted"],
        ]);
        let lenient = transform_summary("num_data_AUT.csv", &input, Measure::Num, &Default::default())
            .unwrap()
            .unwrap();
        assert_eq!(lenient.records()[0][2].as_deref(), Some("6"));

        let strict = TransformOptions {
            strict: true,
            ..Default::default()
        };
        assert!(matches!(
            transform_summary("num_data_AUT.csv", &input, Measure::Num, &strict),
            Err(TransformError::DuplicateContribution { ref slot, .. }) if slot == "num"
        ));
    }

    #[test]
    fn yoy_summary_splits_number_and_volume() {
        let input = rows(&[
            &["13", "0.12", "Dollar Volume"],
            &["13", "0.08", "Number of Loans"],
            &["12", "0.05", "Number of Loans"],
        ]);
        let table = transform_yoy_summary("yoy_data_all_CRC.csv", &input, &Default::default())
            .unwrap()
            .unwrap();

        assert_eq!(table.header(), ["month", "date", "yoy_num", "yoy_vol"]);
        assert_eq!(
            table.records(),
            &[
                cells(&[Some("12"), Some("2001-01"), Some("0.05"), None]),
                cells(&[Some("13"), Some("2001-02"), Some("0.08"), Some("0.12")]),
            ]
        );

        let bad = rows(&[&["1", "0.1", "Balance"]]);
        assert!(matches!(
            transform_yoy_summary("yoy_data_all_CRC.csv", &bad, &Default::default()),
            Err(TransformError::UnrecognizedAdjustmentMarker { .. })
        ));
    }

    #[test]
    fn reruns_are_identical() {
        let input = rows(&[&["3", "1", "Unadjusted"], &["1", "2", "Seasonally Adjusted"]]);
        let opts = TransformOptions::default();
        assert_eq!(
            transform_summary("vol_data_AUT.csv", &input, Measure::Vol, &opts),
            transform_summary("vol_data_AUT.csv", &input, Measure::Vol, &opts)
        );
    }

    #[test]
    fn no_rows_means_no_data() {
        let opts = TransformOptions::default();
        assert_eq!(transform_summary("num_data_AUT.csv", &[], Measure::Num, &opts), Ok(None));
        assert_eq!(transform_yoy_summary("yoy_data_all_AUT.csv", &[], &opts), Ok(None));
    }
}
