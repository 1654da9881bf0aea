// src/dispatch/mod.rs

//! Maps input file names (`<prefix>_<market>.csv`) to the transform that
//! reshapes them and the market directory they are written to.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::reference::{self, GroupType};
use crate::transform::{
    group, map, summary, summary::Measure, yoy, RawRow, TransformOptions, TransformResult,
};

/// Kind of research extract, one per recognised file prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "param", rename_all = "snake_case")]
pub enum ContentType {
    Map,
    Summary(Measure),
    GroupVolume(GroupType),
    YoySummary,
    GroupYoy(GroupType),
}

static PREFIXES: &[(&str, ContentType)] = &[
    ("map_data", ContentType::Map),
    ("num_data", ContentType::Summary(Measure::Num)),
    ("vol_data", ContentType::Summary(Measure::Vol)),
    ("volume_data_age_group", ContentType::GroupVolume(GroupType::Age)),
    ("volume_data_income_level", ContentType::GroupVolume(GroupType::Income)),
    ("volume_data_score_level", ContentType::GroupVolume(GroupType::CreditScore)),
    ("yoy_data_all", ContentType::YoySummary),
    ("yoy_data_age_group", ContentType::GroupYoy(GroupType::Age)),
    ("yoy_data_income_level", ContentType::GroupYoy(GroupType::Income)),
    ("yoy_data_score_level", ContentType::GroupYoy(GroupType::CreditScore)),
];

static FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<prefix>.+)_(?P<market>[a-z]+)\.csv$").expect("file name pattern")
});

impl ContentType {
    /// Every content type, in prefix-table order.
    pub fn all() -> impl Iterator<Item = ContentType> {
        PREFIXES.iter().map(|(_, ct)| *ct)
    }

    /// Look up a file-name prefix, ignoring case.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(prefix))
            .map(|(_, ct)| *ct)
    }

    pub fn prefix(self) -> &'static str {
        PREFIXES
            .iter()
            .find(|(_, ct)| *ct == self)
            .map(|(p, _)| *p)
            .unwrap_or_default()
    }

    /// Output columns, as written on the first line of the output file.
    pub fn header(self) -> Vec<String> {
        match self {
            ContentType::Map => map::header(),
            ContentType::Summary(measure) => summary::header(measure),
            ContentType::GroupVolume(g) => group::header(g),
            ContentType::YoySummary => summary::yoy_header(),
            ContentType::GroupYoy(g) => yoy::header(g),
        }
    }

    /// Run the matching transform over the rows of `file`.
    pub fn apply(self, file: &str, rows: &[RawRow], opts: &TransformOptions) -> TransformResult {
        match self {
            ContentType::Map => map::transform_map(file, rows),
            ContentType::Summary(measure) => summary::transform_summary(file, rows, measure, opts),
            ContentType::GroupVolume(g) => group::transform_group_volume(file, rows, g, opts),
            ContentType::YoySummary => summary::transform_yoy_summary(file, rows, opts),
            ContentType::GroupYoy(g) => yoy::transform_group_yoy(file, rows, g, opts),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// What an input file name says about its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputName {
    pub content_type: ContentType,
    pub market_code: String,
    /// Directory the output lands in.
    pub market: &'static str,
}

/// Split `<prefix>_<market>.csv` and resolve both halves.
pub fn parse_file_name(name: &str) -> Result<InputName> {
    let caps = FILE_NAME
        .captures(name)
        .ok_or_else(|| anyhow!("'{}' does not look like <prefix>_<market>.csv", name))?;

    let market_code = caps["market"].to_ascii_uppercase();
    let market = reference::market_name(&market_code)
        .ok_or_else(|| anyhow!("file '{}' does not specify a known market", name))?;

    let prefix = &caps["prefix"];
    let content_type = ContentType::from_prefix(prefix)
        .ok_or_else(|| anyhow!("file '{}' has unrecognised prefix '{}'", name, prefix))?;

    Ok(InputName {
        content_type,
        market_code,
        market,
    })
}
