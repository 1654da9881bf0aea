// src/transform/yoy.rs

use tracing::debug;

use super::pair::fill_slot;
use super::{
    month_entry, ByMonth, RawRow, Record, RowCtx, Table, TransformError, TransformOptions,
    TransformResult,
};
use crate::reference::GroupType;

/// `month, date, <col>_yoy...` in the group's fixed category order.
pub fn header(group: GroupType) -> Vec<String> {
    ["month".to_string(), "date".to_string()]
        .into_iter()
        .chain(group.yoy_columns().iter().map(|c| format!("{c}_yoy")))
        .collect()
}

/// Year-over-year change broken down by borrower group.
///
/// Input columns: `month`, `value`, `group`. Each month becomes one line with
/// a column per category; categories without a row stay empty. Labels outside
/// the group's category list fail the file.
pub fn transform_group_yoy(
    file: &str,
    rows: &[RawRow],
    group: GroupType,
    opts: &TransformOptions,
) -> TransformResult {
    let labels = group.yoy_labels();
    let mut by_month: ByMonth<Vec<Option<String>>> = ByMonth::new();

    for row in rows {
        let ctx = RowCtx::new(file, row);
        ctx.exact(3)?;
        let month = ctx.month(&row[0])?;
        let label = &row[2];
        let slot = group
            .yoy_position(label)
            .ok_or_else(|| TransformError::IllegalGroupLabel {
                file: file.to_string(),
                label: label.clone(),
                row: ctx.text(),
            })?;

        let slots = month_entry(&mut by_month, month, &ctx, opts, || vec![None; labels.len()])?;
        fill_slot(&mut slots[slot], &row[1], labels[slot], &ctx, opts)?;
    }

    debug!(file, %group, months = by_month.len(), "group yoy pivoted");
    let records: Vec<Record> = by_month
        .into_iter()
        .map(|(month, dated)| {
            let mut record = Vec::with_capacity(2 + dated.value.len());
            record.push(Some(month.get().to_string()));
            record.push(Some(dated.date));
            record.extend(dated.value);
            record
        })
        .collect();

    Ok(Table::new(header(group), records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::{cells, rows};

    #[test]
    fn headers_follow_category_order() {
        assert_eq!(
            header(GroupType::Age),
            [
                "month",
                "date",
                "younger-than-30_yoy",
                "30-44_yoy",
                "45-64_yoy",
                "65-and-older_yoy"
            ]
        );
        assert_eq!(
            header(GroupType::Income),
            ["month", "date", "low_yoy", "moderate_yoy", "middle_yoy", "high_yoy"]
        );
        assert_eq!(
            header(GroupType::CreditScore),
            [
                "month",
                "date",
                "deep-subprime_yoy",
                "subprime_yoy",
                "near-prime_yoy",
                "prime_yoy",
                "super-prime_yoy"
            ]
        );
    }

    #[test]
    fn categories_land_in_fixed_columns() {
        let input = rows(&[
            &["0", "0.4", "65 and older"],
            &["0", "0.2", "30 - 44"],
            &["0", "0.1", "Younger than 30"],
            &["0", "0.3", "45 - 64"],
        ]);
        let table = transform_group_yoy(
            "yoy_data_age_group_AUT.csv",
            &input,
            GroupType::Age,
            &Default::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            table.records(),
            &[cells(&[
                Some("0"),
                Some("2000-01"),
                Some("0.1"),
                Some("0.2"),
                Some("0.3"),
                Some("0.4")
            ])]
        );
    }

    #[test]
    fn missing_categories_stay_empty_and_months_sort() {
        let input = rows(&[
            &["25", "1.5", "Superprime"],
            &["3", "-0.5", "Deep Subprime"],
        ]);
        let table = transform_group_yoy(
            "yoy_data_score_level_CRC.csv",
            &input,
            GroupType::CreditScore,
            &Default::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            table.records(),
            &[
                cells(&[Some("3"), Some("2000-04"), Some("-0.5"), None, None, None, None]),
                cells(&[Some("25"), Some("2002-02"), None, None, None, None, Some("1.5")]),
            ]
        );
    }

    #[test]
    fn unknown_label_is_illegal() {
        let input = rows(&[&["0", "0.1", "Younger than 30"], &["0", "0.2", "Unknown"]]);
        let err = transform_group_yoy(
            "yoy_data_age_group_AUT.csv",
            &input,
            GroupType::Age,
            &Default::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransformError::IllegalGroupLabel {
                file: "yoy_data_age_group_AUT.csv".into(),
                label: "Unknown".into(),
                row: "0,0.2,Unknown".into(),
            }
        );
    }

    #[test]
    fn display_text_is_not_an_input_label() {
        // the fixed list holds raw labels; fixed-up display text is rejected
        let input = rows(&[&["0", "0.1", "Age 30-44"]]);
        assert!(matches!(
            transform_group_yoy("f.csv", &input, GroupType::Age, &Default::default()),
            Err(TransformError::IllegalGroupLabel { .. })
        ));
    }

    #[test]
    fn repeated_category_is_last_write_unless_strict() {
        let input = rows(&[&["0", "1", "Low"], &["0", "2", "Low"]]);
        let table = transform_group_yoy("f.csv", &input, GroupType::Income, &Default::default())
            .unwrap()
            .unwrap();
        assert_eq!(table.records()[0][2].as_deref(), Some("2"));

        let strict = TransformOptions {
            strict: true,
            ..Default::default()
        };
        assert!(matches!(
            transform_group_yoy("f.csv", &input, GroupType::Income, &strict),
            Err(TransformError::DuplicateContribution { ref slot, .. }) if slot == "Low"
        ));
    }

    #[test]
    fn no_rows_means_no_data() {
        for group in GroupType::ALL {
            assert_eq!(
                transform_group_yoy("f.csv", &[], group, &Default::default()),
                Ok(None)
            );
        }
    }
}
