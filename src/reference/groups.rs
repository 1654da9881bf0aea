// src/reference/groups.rs

use serde::Serialize;
use std::fmt;

/// Borrower category a grouped file is broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    Age,
    Income,
    CreditScore,
}

static AGE_LABELS: &[&str] = &["Younger than 30", "30 - 44", "45 - 64", "65 and older"];
static AGE_COLUMNS: &[&str] = &["younger-than-30", "30-44", "45-64", "65-and-older"];

static INCOME_LABELS: &[&str] = &["Low", "Moderate", "Middle", "High"];
static INCOME_COLUMNS: &[&str] = &["low", "moderate", "middle", "high"];

static SCORE_LABELS: &[&str] = &[
    "Deep Subprime",
    "Subprime",
    "Near Prime",
    "Prime",
    "Superprime",
];
static SCORE_COLUMNS: &[&str] = &["deep-subprime", "subprime", "near-prime", "prime", "super-prime"];

impl GroupType {
    pub const ALL: [GroupType; 3] = [GroupType::Age, GroupType::Income, GroupType::CreditScore];

    /// Stem used in the `<stem>_group` column of grouped volume output.
    pub fn column_stem(self) -> &'static str {
        match self {
            GroupType::Age => "age",
            GroupType::Income => "income_level",
            GroupType::CreditScore => "credit_score",
        }
    }

    /// Input labels of the year-over-year categories, in output column order
    /// (youngest to oldest, lowest to highest).
    pub fn yoy_labels(self) -> &'static [&'static str] {
        match self {
            GroupType::Age => AGE_LABELS,
            GroupType::Income => INCOME_LABELS,
            GroupType::CreditScore => SCORE_LABELS,
        }
    }

    /// Column stems matching `yoy_labels` position for position.
    pub fn yoy_columns(self) -> &'static [&'static str] {
        match self {
            GroupType::Age => AGE_COLUMNS,
            GroupType::Income => INCOME_COLUMNS,
            GroupType::CreditScore => SCORE_COLUMNS,
        }
    }

    /// Slot of `label` in the fixed category order.
    pub fn yoy_position(self, label: &str) -> Option<usize> {
        self.yoy_labels().iter().position(|l| *l == label)
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_stem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_columns_line_up() {
        for group in GroupType::ALL {
            assert_eq!(group.yoy_labels().len(), group.yoy_columns().len());
        }
        assert_eq!(GroupType::Age.yoy_labels().len(), 4);
        assert_eq!(GroupType::Income.yoy_labels().len(), 4);
        assert_eq!(GroupType::CreditScore.yoy_labels().len(), 5);
    }

    #[test]
    fn positions_follow_the_fixed_order() {
        assert_eq!(GroupType::Age.yoy_position("Younger than 30"), Some(0));
        assert_eq!(GroupType::Age.yoy_position("65 and older"), Some(3));
        assert_eq!(GroupType::CreditScore.yoy_position("Superprime"), Some(4));
        assert_eq!(GroupType::Income.yoy_position("low"), None);
        assert_eq!(GroupType::Age.yoy_position("Unknown"), None);
    }
}
