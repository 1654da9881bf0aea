// src/transform/mod.rs

//! Row transforms: pivot long-format research extracts (one fact per row)
//! into the wide, fixed-schema tables consumed by the chart front end.
//!
//! Each transform takes the already-parsed rows of one file and returns
//! `Ok(Some(table))`, `Ok(None)` when the file produced no data rows, or a
//! [`TransformError`] that aborts that file only.

pub mod date;
pub mod error;
pub mod group;
pub mod map;
pub mod pair;
pub mod summary;
pub mod yoy;

use std::collections::btree_map::{BTreeMap, Entry};

pub use date::{month_label, DateError, MonthIndex, BASE_YEAR};
pub use error::TransformError;

/// One input line, split into fields, header already stripped.
pub type RawRow = Vec<String>;

/// One output line; `None` marks a value no input row supplied.
pub type Record = Vec<Option<String>>;

pub type TransformResult = Result<Option<Table>, TransformError>;

/// Knobs shared by every transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Year of month index 0.
    pub base_year: i32,
    /// Reject a second value for an already filled slot instead of keeping the last one.
    pub strict: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            base_year: BASE_YEAR,
            strict: false,
        }
    }
}

/// Header plus data records of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table, or `None` when there are no data records.
    pub fn new(header: Vec<String>, records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self { header, records })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of data records (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All lines as CSV cells, header first; nulls become empty cells.
    pub fn lines(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        let header = std::iter::once(self.header.iter().map(String::as_str).collect::<Vec<_>>());
        let body = self
            .records
            .iter()
            .map(|r| r.iter().map(|c| c.as_deref().unwrap_or("")).collect::<Vec<_>>());
        header.chain(body)
    }
}

/// Where a row came from, for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowCtx<'a> {
    pub file: &'a str,
    pub row: &'a [String],
}

impl<'a> RowCtx<'a> {
    pub fn new(file: &'a str, row: &'a [String]) -> Self {
        Self { file, row }
    }

    pub fn text(&self) -> String {
        self.row.join(",")
    }

    /// Require exactly `n` fields.
    pub fn exact(&self, n: usize) -> Result<(), TransformError> {
        if self.row.len() == n {
            Ok(())
        } else {
            Err(self.wrong_count(n))
        }
    }

    /// Require at least `n` fields; extra trailing fields are ignored.
    pub fn at_least(&self, n: usize) -> Result<(), TransformError> {
        if self.row.len() >= n {
            Ok(())
        } else {
            Err(self.wrong_count(n))
        }
    }

    fn wrong_count(&self, expected: usize) -> TransformError {
        TransformError::WrongFieldCount {
            file: self.file.to_string(),
            expected,
            found: self.row.len(),
            row: self.text(),
        }
    }

    pub fn month(&self, raw: &str) -> Result<MonthIndex, TransformError> {
        MonthIndex::parse(raw).map_err(|source| self.bad_month(source))
    }

    pub fn bad_month(&self, source: DateError) -> TransformError {
        TransformError::InvalidMonthIndex {
            file: self.file.to_string(),
            row: self.text(),
            source,
        }
    }
}

/// Value accumulated for one month, with its calendar label.
#[derive(Debug)]
pub(crate) struct Dated<T> {
    pub date: String,
    pub value: T,
}

pub(crate) type ByMonth<T> = BTreeMap<MonthIndex, Dated<T>>;

/// Accumulator for `month`, created with `init` and labelled on first sight.
pub(crate) fn month_entry<'m, T>(
    by_month: &'m mut ByMonth<T>,
    month: MonthIndex,
    ctx: &RowCtx<'_>,
    opts: &TransformOptions,
    init: impl FnOnce() -> T,
) -> Result<&'m mut T, TransformError> {
    let dated = match by_month.entry(month) {
        Entry::Occupied(e) => e.into_mut(),
        Entry::Vacant(e) => {
            let date = month
                .label(opts.base_year)
                .map_err(|source| ctx.bad_month(source))?;
            e.insert(Dated { date, value: init() })
        }
    };
    Ok(&mut dated.value)
}

pub(crate) fn owned_header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::RawRow;

    pub fn rows(raw: &[&[&str]]) -> Vec<RawRow> {
        raw.iter()
            .map(|r| r.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    pub fn cells(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|c| c.map(str::to_string)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_no_data() {
        assert!(Table::new(owned_header(&["a", "b"]), Vec::new()).is_none());
    }

    #[test]
    fn lines_put_header_first_and_blank_nulls() {
        let table = Table::new(
            owned_header(&["month", "value"]),
            vec![vec![Some("0".into()), None]],
        )
        .unwrap();
        let lines: Vec<Vec<&str>> = table.lines().collect();
        assert_eq!(lines, vec![vec!["month", "value"], vec!["0", ""]]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn row_ctx_checks_field_counts() {
        let row: RawRow = vec!["1".into(), "2".into()];
        let ctx = RowCtx::new("f.csv", &row);
        assert!(ctx.exact(2).is_ok());
        assert!(ctx.at_least(1).is_ok());
        assert_eq!(
            ctx.exact(3),
            Err(TransformError::WrongFieldCount {
                file: "f.csv".into(),
                expected: 3,
                found: 2,
                row: "1,2".into(),
            })
        );
    }
}
